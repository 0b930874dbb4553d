//! Book instance (copy) pipelines
//!
//! Copies have no dependents, so deletion is unguarded; a missing target
//! is still treated as success.

use crate::{
    error::{AppError, AppResult},
    forms::{sanitize, validate, BookInstanceForm, Check, Rule},
    models::{
        BookInstance, BookInstanceData, BookInstanceWithBook, BookRef, InstanceStatus,
    },
    repository::Repository,
};

use super::FormOutcome;

const RULES: &[Rule] = &[
    Rule::new("book", Check::NotEmpty, "Book must be specified"),
    Rule::new("imprint", Check::NotEmpty, "Imprint must be specified"),
    Rule::new("due_back", Check::IsoDate, "Invalid date"),
];

/// Invalid-submission context: the copy form needs the selectable book
/// list alongside the echoed values.
#[derive(Debug)]
pub struct BookInstanceFormContext {
    pub values: BookInstanceData,
    pub book_list: Vec<BookRef>,
}

#[derive(Clone)]
pub struct BookInstanceService {
    repository: Repository,
}

impl BookInstanceService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<BookInstanceWithBook>> {
        self.repository.book_instances.find_all().await
    }

    pub async fn detail(&self, id: i32) -> AppResult<BookInstanceWithBook> {
        self.repository
            .book_instances
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book copy {} not found", id)))
    }

    /// Selectable books for the create form
    pub async fn book_list(&self) -> AppResult<Vec<BookRef>> {
        self.repository.books.find_all().await
    }

    /// Target and book list for the update form
    pub async fn update_view(&self, id: i32) -> AppResult<(BookInstance, Vec<BookRef>)> {
        let (instance, books) = tokio::try_join!(
            self.repository.book_instances.find_by_id(id),
            self.repository.books.find_all(),
        )?;
        let instance =
            instance.ok_or_else(|| AppError::NotFound(format!("Book copy {} not found", id)))?;
        Ok((instance, books))
    }

    pub async fn create(
        &self,
        form: &BookInstanceForm,
    ) -> AppResult<FormOutcome<BookInstanceFormContext>> {
        let violations = validate(&form.field_map(), RULES);
        let data = sanitized(form);

        if !violations.is_empty() {
            // re-fetch the selectable books so the form can be redrawn
            let book_list = self.repository.books.find_all().await?;
            return Ok(FormOutcome::Invalid {
                values: BookInstanceFormContext {
                    values: data,
                    book_list,
                },
                violations,
            });
        }

        let instance = self.repository.book_instances.create(&data).await?;
        tracing::info!("Created book instance {}", instance.id);
        Ok(FormOutcome::Saved {
            location: instance.url(),
        })
    }

    pub async fn update(
        &self,
        id: i32,
        form: &BookInstanceForm,
    ) -> AppResult<FormOutcome<BookInstanceFormContext>> {
        let violations = validate(&form.field_map(), RULES);
        let data = sanitized(form);

        if !violations.is_empty() {
            let book_list = self.repository.books.find_all().await?;
            return Ok(FormOutcome::Invalid {
                values: BookInstanceFormContext {
                    values: data,
                    book_list,
                },
                violations,
            });
        }

        let instance = self.repository.book_instances.update(id, &data).await?;
        Ok(FormOutcome::Saved {
            location: instance.url(),
        })
    }

    /// Data for the delete-confirmation page; `None` means already gone
    pub async fn delete_view(&self, id: i32) -> AppResult<Option<BookInstanceWithBook>> {
        self.repository.book_instances.find_detail(id).await
    }

    /// Unguarded delete. Returns whether a copy was actually removed;
    /// either way the caller redirects to the list.
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        match self.repository.book_instances.find_by_id(id).await? {
            None => Ok(false),
            Some(_) => {
                self.repository.book_instances.delete(id).await?;
                tracing::info!("Deleted book instance {}", id);
                Ok(true)
            }
        }
    }
}

/// Sanitize all fields, regardless of validation outcome. A book
/// reference that is not a valid id sanitizes to `None` and is rejected
/// by the persistence layer; an unrecognized status falls back to the
/// default.
fn sanitized(form: &BookInstanceForm) -> BookInstanceData {
    BookInstanceData {
        book_id: form.book.trim().parse().ok(),
        imprint: sanitize::clean_text(&form.imprint),
        status: InstanceStatus::from_form_value(form.status.trim()),
        due_back: sanitize::to_date(&form.due_back),
    }
}
