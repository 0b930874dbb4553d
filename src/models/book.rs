//! Book model
//!
//! Books are maintained elsewhere; this application reads them as the
//! dependent set guarding author/genre deletion and as the selectable
//! list on book-copy forms.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full book record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: i32,
}

/// Id/title projection for form select lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookRef {
    pub id: i32,
    pub title: String,
}

impl Book {
    /// Canonical URL for this book
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}
