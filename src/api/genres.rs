//! Genre page handlers

use axum::{
    extract::{Path, State},
    response::Response,
    Form,
};
use serde_json::json;

use crate::{
    error::AppResult,
    forms::GenreForm,
    models::Genre,
    services::{DeleteOutcome, FormOutcome},
    AppState,
};

use super::{found, page};

const LIST_URL: &str = "/catalog/genres";

/// List all genres
pub async fn genre_list(State(state): State<AppState>) -> AppResult<Response> {
    let genres = state.services.genres.list().await?;
    let entries: Vec<_> = genres
        .iter()
        .map(|g| json!({"url": g.url(), "label": g.name}))
        .collect();
    page(
        &state,
        "genre_list",
        json!({"title": "Genre list", "genre_list": entries}),
    )
}

/// Genre detail page with the genre's books
pub async fn genre_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let (genre, books) = state.services.genres.detail(id).await?;
    let book_entries: Vec<_> = books
        .iter()
        .map(|b| json!({"url": b.url(), "label": b.title, "detail": b.summary}))
        .collect();
    page(
        &state,
        "genre_detail",
        json!({
            "title": "Genre Detail",
            "genre": {"name": genre.name},
            "genre_books": book_entries,
        }),
    )
}

/// Blank create form
pub async fn genre_create_get(State(state): State<AppState>) -> AppResult<Response> {
    page(&state, "genre_form", json!({"title": "Create Genre"}))
}

/// Create submit: an existing identical name redirects to that genre
/// instead of creating a duplicate
pub async fn genre_create_post(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    match state.services.genres.create(&form).await? {
        FormOutcome::Saved { location } => Ok(found(&location)),
        FormOutcome::Invalid { values, violations } => page(
            &state,
            "genre_form",
            json!({"title": "Create Genre", "genre": values, "errors": violations}),
        ),
    }
}

/// Delete confirmation page
pub async fn genre_delete_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    match state.services.genres.delete_view(id).await? {
        None => Ok(found(LIST_URL)),
        Some((genre, books)) => delete_page(&state, &genre, &books),
    }
}

/// Delete submit: blocked while dependent books exist
pub async fn genre_delete_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    match state.services.genres.delete(id).await? {
        DeleteOutcome::Missing | DeleteOutcome::Deleted => Ok(found(LIST_URL)),
        DeleteOutcome::Blocked { entity, dependents } => {
            delete_page(&state, &entity, &dependents)
        }
    }
}

/// Update form pre-filled with the stored name
pub async fn genre_update_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let genre = state.services.genres.get(id).await?;
    page(
        &state,
        "genre_form",
        json!({"title": "Update Genre", "genre": {"name": genre.name}}),
    )
}

/// Update submit
pub async fn genre_update_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    match state.services.genres.update(id, &form).await? {
        FormOutcome::Saved { location } => Ok(found(&location)),
        FormOutcome::Invalid { values, violations } => page(
            &state,
            "genre_form",
            json!({"title": "Update Genre", "genre": values, "errors": violations}),
        ),
    }
}

fn delete_page(
    state: &AppState,
    genre: &Genre,
    books: &[crate::models::Book],
) -> AppResult<Response> {
    let book_entries: Vec<_> = books
        .iter()
        .map(|b| json!({"url": b.url(), "label": b.title, "detail": b.summary}))
        .collect();
    page(
        state,
        "genre_delete",
        json!({
            "title": "Delete Genre",
            "genre": {"name": genre.name},
            "genre_books": book_entries,
        }),
    )
}
