//! Book instance (physical copy) model and status enum

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Loan status of a physical copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "instance_status", rename_all = "PascalCase")]
pub enum InstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl InstanceStatus {
    /// Parse a submitted form value; anything unrecognized falls back to
    /// the default status.
    pub fn from_form_value(value: &str) -> Self {
        match value {
            "Available" => InstanceStatus::Available,
            "Loaned" => InstanceStatus::Loaned,
            "Reserved" => InstanceStatus::Reserved,
            _ => InstanceStatus::Maintenance,
        }
    }
}

impl std::fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            InstanceStatus::Available => "Available",
            InstanceStatus::Maintenance => "Maintenance",
            InstanceStatus::Loaned => "Loaned",
            InstanceStatus::Reserved => "Reserved",
        };
        write!(f, "{}", label)
    }
}

/// Book instance record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookInstance {
    pub id: i32,
    pub book_id: i32,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: NaiveDate,
}

/// Book instance joined with its book's title, for list and detail views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookInstanceWithBook {
    pub id: i32,
    pub book_id: i32,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: NaiveDate,
    pub book_title: String,
}

impl BookInstanceWithBook {
    pub fn due_back_formatted(&self) -> String {
        self.due_back.format("%Y-%m-%d").to_string()
    }

    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }
}

/// Sanitized book-instance fields for create/update and form echo.
///
/// `book_id` is `None` when the submitted reference was empty or not a
/// valid identifier; `due_back` is `None` when omitted, in which case the
/// persistence layer applies the current date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookInstanceData {
    pub book_id: Option<i32>,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn due_back_formatted(&self) -> String {
        self.due_back.format("%Y-%m-%d").to_string()
    }

    /// Canonical URL for this copy
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }
}
