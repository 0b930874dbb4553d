//! Author page handlers

use axum::{
    extract::{Path, State},
    response::Response,
    Form,
};
use serde_json::json;

use crate::{
    error::AppResult,
    forms::AuthorForm,
    models::Author,
    services::{DeleteOutcome, FormOutcome},
    AppState,
};

use super::{found, page};

const LIST_URL: &str = "/catalog/authors";

/// List all authors
pub async fn author_list(State(state): State<AppState>) -> AppResult<Response> {
    let authors = state.services.authors.list().await?;
    let entries: Vec<_> = authors
        .iter()
        .map(|a| json!({"url": a.url(), "label": a.name(), "detail": a.lifespan()}))
        .collect();
    page(
        &state,
        "author_list",
        json!({"title": "Author list", "author_list": entries}),
    )
}

/// Author detail page with the author's books
pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let (author, books) = state.services.authors.detail(id).await?;
    let book_entries: Vec<_> = books
        .iter()
        .map(|b| json!({"url": b.url(), "label": b.title, "detail": b.summary}))
        .collect();
    page(
        &state,
        "author_detail",
        json!({
            "title": "Author detail",
            "author": {"name": author.name(), "lifespan": author.lifespan()},
            "author_books": book_entries,
        }),
    )
}

/// Blank create form
pub async fn author_create_get(State(state): State<AppState>) -> AppResult<Response> {
    page(&state, "author_form", json!({"title": "Create Author"}))
}

/// Create submit: redirect on success, redraw the form on violations
pub async fn author_create_post(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.create(&form).await? {
        FormOutcome::Saved { location } => Ok(found(&location)),
        FormOutcome::Invalid { values, violations } => page(
            &state,
            "author_form",
            json!({"title": "Create Author", "author": values, "errors": violations}),
        ),
    }
}

/// Delete confirmation page
pub async fn author_delete_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    match state.services.authors.delete_view(id).await? {
        None => Ok(found(LIST_URL)),
        Some((author, books)) => delete_page(&state, &author, &books),
    }
}

/// Delete submit: blocked while dependent books exist
pub async fn author_delete_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    match state.services.authors.delete(id).await? {
        DeleteOutcome::Missing | DeleteOutcome::Deleted => Ok(found(LIST_URL)),
        DeleteOutcome::Blocked { entity, dependents } => {
            delete_page(&state, &entity, &dependents)
        }
    }
}

/// Update form pre-filled with the stored values
pub async fn author_update_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let author = state.services.authors.get(id).await?;
    page(
        &state,
        "author_form",
        json!({
            "title": "Update Author",
            "author": {
                "first_name": author.first_name,
                "family_name": author.family_name,
                "date_of_birth": author.date_of_birth_formatted(),
                "date_of_death": author.date_of_death_formatted(),
            },
        }),
    )
}

/// Update submit
pub async fn author_update_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    match state.services.authors.update(id, &form).await? {
        FormOutcome::Saved { location } => Ok(found(&location)),
        FormOutcome::Invalid { values, violations } => page(
            &state,
            "author_form",
            json!({"title": "Update Author", "author": values, "errors": violations}),
        ),
    }
}

fn delete_page(
    state: &AppState,
    author: &Author,
    books: &[crate::models::Book],
) -> AppResult<Response> {
    let book_entries: Vec<_> = books
        .iter()
        .map(|b| json!({"url": b.url(), "label": b.title, "detail": b.summary}))
        .collect();
    page(
        state,
        "author_delete",
        json!({
            "title": "Delete Author",
            "author": {"name": author.name(), "lifespan": author.lifespan()},
            "author_books": book_entries,
        }),
    )
}
