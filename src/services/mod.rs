//! Form and delete pipelines, one service per entity kind

pub mod authors;
pub mod book_instances;
pub mod genres;

use crate::forms::Violation;
use crate::repository::Repository;

/// Outcome of a create/update form pipeline
#[derive(Debug)]
pub enum FormOutcome<T> {
    /// Validation failed: re-render the form with the sanitized values
    /// and the violation messages. Nothing was persisted.
    Invalid {
        values: T,
        violations: Vec<Violation>,
    },
    /// The entity was persisted, or an existing one matched: redirect
    /// to its canonical URL.
    Saved { location: String },
}

/// Outcome of a delete pipeline
#[derive(Debug)]
pub enum DeleteOutcome<T, D> {
    /// Target absent: deletion already satisfied, redirect to the list
    Missing,
    /// Dependents block deletion: render the confirmation view again
    Blocked { entity: T, dependents: Vec<D> },
    /// Target deleted, redirect to the list
    Deleted,
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorService,
    pub genres: genres::GenreService,
    pub book_instances: book_instances::BookInstanceService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorService::new(repository.clone()),
            genres: genres::GenreService::new(repository.clone()),
            book_instances: book_instances::BookInstanceService::new(repository),
        }
    }
}
