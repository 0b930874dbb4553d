//! Author model and derivations

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full author record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Sanitized author fields, used for both create and update (full
/// replacement) and echoed back into the form on validation failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorData {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Display name, empty when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{} {}", self.family_name, self.first_name)
    }

    /// Lifespan string, e.g. "December 16th, 1775 - July 18th, 1817"
    pub fn lifespan(&self) -> String {
        let mut lifespan = String::new();
        if let Some(birth) = self.date_of_birth {
            lifespan.push_str(&format_long_date(birth));
        }
        lifespan.push_str(" - ");
        if let Some(death) = self.date_of_death {
            lifespan.push_str(&format_long_date(death));
        }
        lifespan
    }

    pub fn date_of_birth_formatted(&self) -> String {
        self.date_of_birth
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    pub fn date_of_death_formatted(&self) -> String {
        self.date_of_death
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// Canonical URL for this author
    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }
}

/// Long date format with ordinal day, e.g. "May 3rd, 1469"
fn format_long_date(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match day {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{} {}{}, {}", date.format("%B"), day, suffix, date.year())
}
