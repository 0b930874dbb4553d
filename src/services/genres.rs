//! Genre pipelines

use crate::{
    error::{AppError, AppResult},
    forms::{sanitize, validate, Check, GenreForm, Rule},
    models::{Book, Genre, GenreData},
    repository::Repository,
};

use super::{DeleteOutcome, FormOutcome};

// The 3-100 length bound also exists as a schema CHECK; validating it
// here keeps bad submissions out of the persistence layer entirely.
const RULES: &[Rule] = &[
    Rule::new("name", Check::NotEmpty, "Genre name required"),
    Rule::new(
        "name",
        Check::LengthRange { min: 3, max: 100 },
        "Genre name must be between 3 and 100 characters",
    ),
];

#[derive(Clone)]
pub struct GenreService {
    repository: Repository,
}

impl GenreService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.find_all().await
    }

    /// Genre plus its books, for the detail page
    pub async fn detail(&self, id: i32) -> AppResult<(Genre, Vec<Book>)> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres.find_by_id(id),
            self.repository.books.find_by_genre(id),
        )?;
        let genre = genre.ok_or_else(|| AppError::NotFound(format!("Genre {} not found", id)))?;
        Ok((genre, books))
    }

    /// Target of the update form
    pub async fn get(&self, id: i32) -> AppResult<Genre> {
        self.repository
            .genres
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Genre {} not found", id)))
    }

    /// Create with exact-name deduplication: submitting a name that
    /// already exists redirects to the existing genre instead of
    /// inserting a duplicate.
    pub async fn create(&self, form: &GenreForm) -> AppResult<FormOutcome<GenreData>> {
        let violations = validate(&form.field_map(), RULES);
        let data = GenreData {
            name: sanitize::clean_text(&form.name),
        };

        if !violations.is_empty() {
            return Ok(FormOutcome::Invalid {
                values: data,
                violations,
            });
        }

        if let Some(existing) = self.repository.genres.find_by_name(&data.name).await? {
            return Ok(FormOutcome::Saved {
                location: existing.url(),
            });
        }

        let genre = self.repository.genres.create(&data).await?;
        tracing::info!("Created genre {}", genre.id);
        Ok(FormOutcome::Saved {
            location: genre.url(),
        })
    }

    pub async fn update(&self, id: i32, form: &GenreForm) -> AppResult<FormOutcome<GenreData>> {
        let violations = validate(&form.field_map(), RULES);
        let data = GenreData {
            name: sanitize::clean_text(&form.name),
        };

        if !violations.is_empty() {
            return Ok(FormOutcome::Invalid {
                values: data,
                violations,
            });
        }

        let genre = self.repository.genres.update(id, &data).await?;
        Ok(FormOutcome::Saved {
            location: genre.url(),
        })
    }

    /// Data for the delete-confirmation page; `None` means already gone
    pub async fn delete_view(&self, id: i32) -> AppResult<Option<(Genre, Vec<Book>)>> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres.find_by_id(id),
            self.repository.books.find_by_genre(id),
        )?;
        Ok(genre.map(|g| (g, books)))
    }

    /// Delete guarded by dependent books: allowed exactly when the
    /// dependents list is empty.
    pub async fn delete(&self, id: i32) -> AppResult<DeleteOutcome<Genre, Book>> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres.find_by_id(id),
            self.repository.books.find_by_genre(id),
        )?;

        let Some(genre) = genre else {
            return Ok(DeleteOutcome::Missing);
        };

        if !books.is_empty() {
            return Ok(DeleteOutcome::Blocked {
                entity: genre,
                dependents: books,
            });
        }

        self.repository.genres.delete(id).await?;
        tracing::info!("Deleted genre {}", id);
        Ok(DeleteOutcome::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        MockAuthorRepository, MockBookInstanceRepository, MockBookRepository, MockGenreRepository,
        Repository,
    };
    use std::sync::Arc;

    fn repository(genres: MockGenreRepository, books: MockBookRepository) -> Repository {
        Repository {
            authors: Arc::new(MockAuthorRepository::new()),
            genres: Arc::new(genres),
            books: Arc::new(books),
            book_instances: Arc::new(MockBookInstanceRepository::new()),
        }
    }

    fn form(name: &str) -> GenreForm {
        GenreForm {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_new_name_inserts_and_redirects() {
        let mut genres = MockGenreRepository::new();
        genres.expect_find_by_name().returning(|_| Ok(None));
        genres.expect_create().times(1).returning(|data| {
            Ok(Genre {
                id: 5,
                name: data.name.clone(),
            })
        });

        let service = GenreService::new(repository(genres, MockBookRepository::new()));
        let outcome = service.create(&form("Fantasy")).await.unwrap();

        match outcome {
            FormOutcome::Saved { location } => assert_eq!(location, "/catalog/genre/5"),
            other => panic!("expected Saved, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_duplicate_name_redirects_to_existing() {
        let mut genres = MockGenreRepository::new();
        genres.expect_find_by_name().withf(|name| name == "Fiction").returning(|name| {
            Ok(Some(Genre {
                id: 2,
                name: name.to_string(),
            }))
        });
        // create must never be called

        let service = GenreService::new(repository(genres, MockBookRepository::new()));
        let outcome = service.create(&form("Fiction")).await.unwrap();

        match outcome {
            FormOutcome::Saved { location } => assert_eq!(location, "/catalog/genre/2"),
            other => panic!("expected Saved, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_empty_name_fails_validation() {
        let service =
            GenreService::new(repository(MockGenreRepository::new(), MockBookRepository::new()));

        let outcome = service.create(&form("   ")).await.unwrap();

        match outcome {
            FormOutcome::Invalid { violations, .. } => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].message, "Genre name required");
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_short_name_fails_length_bound() {
        let service =
            GenreService::new(repository(MockGenreRepository::new(), MockBookRepository::new()));

        let outcome = service.create(&form("ab")).await.unwrap();

        match outcome {
            FormOutcome::Invalid { violations, .. } => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "name");
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_missing_genre_is_idempotent() {
        let mut genres = MockGenreRepository::new();
        genres.expect_find_by_id().returning(|_| Ok(None));

        let mut books = MockBookRepository::new();
        books.expect_find_by_genre().returning(|_| Ok(vec![]));

        let service = GenreService::new(repository(genres, books));
        let outcome = service.delete(999).await.unwrap();

        assert!(matches!(outcome, DeleteOutcome::Missing));
    }

    #[tokio::test]
    async fn test_delete_allowed_when_dependents_empty() {
        let mut genres = MockGenreRepository::new();
        genres.expect_find_by_id().returning(|id| {
            Ok(Some(Genre {
                id,
                name: "Fiction".to_string(),
            }))
        });
        genres.expect_delete().times(1).returning(|_| Ok(()));

        let mut books = MockBookRepository::new();
        books.expect_find_by_genre().returning(|_| Ok(vec![]));

        let service = GenreService::new(repository(genres, books));
        let outcome = service.delete(2).await.unwrap();

        assert!(matches!(outcome, DeleteOutcome::Deleted));
    }

    #[tokio::test]
    async fn test_delete_blocked_when_books_reference_genre() {
        let mut genres = MockGenreRepository::new();
        genres.expect_find_by_id().returning(|id| {
            Ok(Some(Genre {
                id,
                name: "Fiction".to_string(),
            }))
        });
        // delete must never be called

        let mut books = MockBookRepository::new();
        books.expect_find_by_genre().returning(|_| {
            Ok(vec![Book {
                id: 1,
                title: "Emma".to_string(),
                summary: String::new(),
                isbn: String::new(),
                author_id: 1,
            }])
        });

        let service = GenreService::new(repository(genres, books));
        let outcome = service.delete(2).await.unwrap();

        assert!(matches!(outcome, DeleteOutcome::Blocked { .. }));
    }
}
