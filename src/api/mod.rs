//! HTTP handlers for the catalog pages

pub mod authors;
pub mod book_instances;
pub mod genres;
pub mod health;

use axum::{
    http::{header::LOCATION, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde_json::Value;

use crate::{error::AppResult, AppState};

/// 302 redirect, the classic form-flow answer to a successful submit
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

/// Render a template through the configured view renderer
pub(crate) fn page(state: &AppState, template: &str, context: Value) -> AppResult<Response> {
    let html = state.renderer.render(template, context)?;
    Ok(Html(html).into_response())
}
