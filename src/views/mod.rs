//! View rendering seam
//!
//! Handlers address templates by name and hand over a JSON context; the
//! renderer behind the trait decides what the markup looks like. Field
//! values arrive pre-escaped from the sanitizer.

pub mod html;

use serde_json::Value;

use crate::error::AppResult;

pub use html::HtmlRenderer;

/// Produces an HTML document from a template name and a data payload
pub trait ViewRenderer: Send + Sync {
    fn render(&self, template: &str, context: Value) -> AppResult<String>;
}
