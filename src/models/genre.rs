//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Genre record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// Sanitized genre fields for create/update and form echo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenreData {
    pub name: String,
}

impl Genre {
    /// Canonical URL for this genre
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url() {
        let genre = Genre {
            id: 3,
            name: "Fiction".to_string(),
        };
        assert_eq!(genre.url(), "/catalog/genre/3");
    }
}
