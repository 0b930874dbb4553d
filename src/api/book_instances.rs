//! Book instance (copy) page handlers

use axum::{
    extract::{Path, State},
    response::Response,
    Form,
};
use serde_json::json;

use crate::{
    error::AppResult,
    forms::BookInstanceForm,
    models::BookRef,
    services::{book_instances::BookInstanceFormContext, FormOutcome},
    AppState,
};

use super::{found, page};

const LIST_URL: &str = "/catalog/bookinstances";

/// List all copies
pub async fn bookinstance_list(State(state): State<AppState>) -> AppResult<Response> {
    let instances = state.services.book_instances.list().await?;
    let entries: Vec<_> = instances
        .iter()
        .map(|i| {
            json!({
                "url": i.url(),
                "label": format!("{}: {}", i.book_title, i.imprint),
                "detail": format!("{}, due {}", i.status, i.due_back_formatted()),
            })
        })
        .collect();
    page(
        &state,
        "bookinstance_list",
        json!({"title": "Book instance list", "bookinstance_list": entries}),
    )
}

/// Copy detail page
pub async fn bookinstance_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let instance = state.services.book_instances.detail(id).await?;
    page(
        &state,
        "bookinstance_detail",
        json!({
            "title": format!("Copy: {}", instance.book_title),
            "bookinstance": {
                "book": instance.book_title,
                "imprint": instance.imprint,
                "status": instance.status.to_string(),
                "due_back": instance.due_back_formatted(),
            },
        }),
    )
}

/// Create form with the selectable book list
pub async fn bookinstance_create_get(State(state): State<AppState>) -> AppResult<Response> {
    let books = state.services.book_instances.book_list().await?;
    page(
        &state,
        "bookinstance_form",
        json!({"title": "Create BookInstance", "book_list": book_entries(&books)}),
    )
}

/// Create submit
pub async fn bookinstance_create_post(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    match state.services.book_instances.create(&form).await? {
        FormOutcome::Saved { location } => Ok(found(&location)),
        FormOutcome::Invalid { values, violations } => {
            retry_page(&state, "Create BookInstance", values, violations)
        }
    }
}

/// Delete confirmation page; a missing copy goes straight back to the list
pub async fn bookinstance_delete_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    match state.services.book_instances.delete_view(id).await? {
        None => Ok(found(LIST_URL)),
        Some(instance) => page(
            &state,
            "bookinstance_delete",
            json!({
                "title": "Delete Book Instance",
                "bookinstance": {
                    "book": instance.book_title,
                    "imprint": instance.imprint,
                    "status": instance.status.to_string(),
                    "due_back": instance.due_back_formatted(),
                },
            }),
        ),
    }
}

/// Delete submit: no dependent check, missing target still counts as done
pub async fn bookinstance_delete_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    state.services.book_instances.delete(id).await?;
    Ok(found(LIST_URL))
}

/// Update form pre-filled with the stored values
pub async fn bookinstance_update_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let (instance, books) = state.services.book_instances.update_view(id).await?;
    page(
        &state,
        "bookinstance_form",
        json!({
            "title": "Update Book Instance",
            "bookinstance": {
                "book": instance.book_id,
                "imprint": instance.imprint,
                "status": instance.status.to_string(),
                "due_back": instance.due_back_formatted(),
            },
            "book_list": book_entries(&books),
            "selected_book": instance.book_id,
        }),
    )
}

/// Update submit
pub async fn bookinstance_update_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    match state.services.book_instances.update(id, &form).await? {
        FormOutcome::Saved { location } => Ok(found(&location)),
        FormOutcome::Invalid { values, violations } => {
            retry_page(&state, "Update Book Instance", values, violations)
        }
    }
}

fn book_entries(books: &[BookRef]) -> Vec<serde_json::Value> {
    books
        .iter()
        .map(|b| json!({"id": b.id, "title": b.title}))
        .collect()
}

fn retry_page(
    state: &AppState,
    title: &str,
    context: BookInstanceFormContext,
    violations: Vec<crate::forms::Violation>,
) -> AppResult<Response> {
    let selected_book = context.values.book_id;
    page(
        state,
        "bookinstance_form",
        json!({
            "title": title,
            "bookinstance": context.values,
            "book_list": book_entries(&context.book_list),
            "selected_book": selected_book,
            "errors": violations,
        }),
    )
}
