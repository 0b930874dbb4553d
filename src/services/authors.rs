//! Author pipelines

use crate::{
    error::{AppError, AppResult},
    forms::{sanitize, validate, AuthorForm, Check, Rule},
    models::{Author, AuthorData, Book},
    repository::Repository,
};

use super::{DeleteOutcome, FormOutcome};

const RULES: &[Rule] = &[
    Rule::new("first_name", Check::NotEmpty, "First name must be specified"),
    Rule::new(
        "first_name",
        Check::Alphanumeric,
        "First name has non-alphanumeric characters.",
    ),
    Rule::new("family_name", Check::NotEmpty, "Family name must be specified"),
    Rule::new(
        "family_name",
        Check::Alphanumeric,
        "Family name has non-alphanumeric characters.",
    ),
    Rule::new("date_of_birth", Check::IsoDate, "Invalid date of birth"),
    Rule::new("date_of_death", Check::IsoDate, "Invalid date of death"),
];

#[derive(Clone)]
pub struct AuthorService {
    repository: Repository,
}

impl AuthorService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.find_all().await
    }

    /// Author plus their books, for the detail page
    pub async fn detail(&self, id: i32) -> AppResult<(Author, Vec<Book>)> {
        let (author, books) = tokio::try_join!(
            self.repository.authors.find_by_id(id),
            self.repository.books.find_by_author(id),
        )?;
        let author =
            author.ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))?;
        Ok((author, books))
    }

    /// Target of the update form
    pub async fn get(&self, id: i32) -> AppResult<Author> {
        self.repository
            .authors
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    pub async fn create(&self, form: &AuthorForm) -> AppResult<FormOutcome<AuthorData>> {
        let violations = validate(&form.field_map(), RULES);
        let data = sanitized(form);

        if !violations.is_empty() {
            return Ok(FormOutcome::Invalid {
                values: data,
                violations,
            });
        }

        let author = self.repository.authors.create(&data).await?;
        tracing::info!("Created author {}", author.id);
        Ok(FormOutcome::Saved {
            location: author.url(),
        })
    }

    pub async fn update(&self, id: i32, form: &AuthorForm) -> AppResult<FormOutcome<AuthorData>> {
        let violations = validate(&form.field_map(), RULES);
        let data = sanitized(form);

        if !violations.is_empty() {
            return Ok(FormOutcome::Invalid {
                values: data,
                violations,
            });
        }

        let author = self.repository.authors.update(id, &data).await?;
        Ok(FormOutcome::Saved {
            location: author.url(),
        })
    }

    /// Data for the delete-confirmation page; `None` means the target is
    /// already gone and the caller should redirect to the list.
    pub async fn delete_view(&self, id: i32) -> AppResult<Option<(Author, Vec<Book>)>> {
        let (author, books) = tokio::try_join!(
            self.repository.authors.find_by_id(id),
            self.repository.books.find_by_author(id),
        )?;
        Ok(author.map(|a| (a, books)))
    }

    /// Delete guarded by dependent books
    pub async fn delete(&self, id: i32) -> AppResult<DeleteOutcome<Author, Book>> {
        let (author, books) = tokio::try_join!(
            self.repository.authors.find_by_id(id),
            self.repository.books.find_by_author(id),
        )?;

        let Some(author) = author else {
            return Ok(DeleteOutcome::Missing);
        };

        if !books.is_empty() {
            return Ok(DeleteOutcome::Blocked {
                entity: author,
                dependents: books,
            });
        }

        self.repository.authors.delete(id).await?;
        tracing::info!("Deleted author {}", id);
        Ok(DeleteOutcome::Deleted)
    }
}

/// Sanitize all fields, regardless of validation outcome
fn sanitized(form: &AuthorForm) -> AuthorData {
    AuthorData {
        first_name: sanitize::clean_text(&form.first_name),
        family_name: sanitize::clean_text(&form.family_name),
        date_of_birth: sanitize::to_date(&form.date_of_birth),
        date_of_death: sanitize::to_date(&form.date_of_death),
    }
}
