//! Form handling: raw submissions, validation rules and sanitization
//!
//! Validation and sanitization both operate on the ordered raw field map;
//! both always run, in that order, before the pipeline decides between
//! re-rendering the form and persisting.

pub mod rules;
pub mod sanitize;

pub use rules::{validate, Check, Rule, Violation};

use indexmap::IndexMap;
use serde::Deserialize;

/// Ordered mapping of raw form field name to raw submitted value
pub type FieldMap = IndexMap<String, String>;

/// Raw author form submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub date_of_death: String,
}

impl AuthorForm {
    pub fn field_map(&self) -> FieldMap {
        IndexMap::from([
            ("first_name".to_string(), self.first_name.clone()),
            ("family_name".to_string(), self.family_name.clone()),
            ("date_of_birth".to_string(), self.date_of_birth.clone()),
            ("date_of_death".to_string(), self.date_of_death.clone()),
        ])
    }
}

/// Raw genre form submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenreForm {
    #[serde(default)]
    pub name: String,
}

impl GenreForm {
    pub fn field_map(&self) -> FieldMap {
        IndexMap::from([("name".to_string(), self.name.clone())])
    }
}

/// Raw book-instance form submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookInstanceForm {
    #[serde(default)]
    pub book: String,
    #[serde(default)]
    pub imprint: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub due_back: String,
}

impl BookInstanceForm {
    pub fn field_map(&self) -> FieldMap {
        IndexMap::from([
            ("book".to_string(), self.book.clone()),
            ("imprint".to_string(), self.imprint.clone()),
            ("status".to_string(), self.status.clone()),
            ("due_back".to_string(), self.due_back.clone()),
        ])
    }
}
