//! Built-in HTML renderer
//!
//! Renders any template context into a minimal, well-formed page:
//! heading from `title`, violation messages from `errors`, then one
//! section per remaining context entry. List entries carrying `url` and
//! `label` become links; scalar entries become labeled paragraphs;
//! objects become definition lists.

use serde_json::Value;

use crate::error::{AppError, AppResult};

use super::ViewRenderer;

#[derive(Clone, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ViewRenderer for HtmlRenderer {
    fn render(&self, template: &str, context: Value) -> AppResult<String> {
        let fields = context
            .as_object()
            .ok_or_else(|| AppError::Render(format!("{}: context must be an object", template)))?;

        let title = fields
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("LocalLibrary");

        let mut body = String::new();
        body.push_str(&format!("<h1>{}</h1>\n", title));

        if let Some(errors) = fields.get("errors").and_then(Value::as_array) {
            body.push_str("<ul class=\"errors\">\n");
            for error in errors {
                let message = error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                body.push_str(&format!("<li>{}</li>\n", message));
            }
            body.push_str("</ul>\n");
        }

        for (key, value) in fields {
            if key == "title" || key == "errors" {
                continue;
            }
            render_section(&mut body, key, value);
        }

        Ok(format!(
            "<!DOCTYPE html>\n<html>\n<head><title>{}</title></head>\n\
             <body data-template=\"{}\">\n{}</body>\n</html>\n",
            title, template, body
        ))
    }
}

fn render_section(body: &mut String, key: &str, value: &Value) {
    match value {
        Value::Array(items) => {
            body.push_str(&format!("<ul class=\"{}\">\n", key));
            for item in items {
                body.push_str("<li>");
                render_item(body, item);
                body.push_str("</li>\n");
            }
            body.push_str("</ul>\n");
        }
        Value::Object(entries) => {
            body.push_str(&format!("<dl class=\"{}\">\n", key));
            for (name, entry) in entries {
                body.push_str(&format!("<dt>{}</dt><dd>{}</dd>\n", name, scalar(entry)));
            }
            body.push_str("</dl>\n");
        }
        other => {
            body.push_str(&format!(
                "<p class=\"{}\"><strong>{}:</strong> {}</p>\n",
                key,
                key,
                scalar(other)
            ));
        }
    }
}

fn render_item(body: &mut String, item: &Value) {
    if let Some(entries) = item.as_object() {
        match (
            entries.get("url").and_then(Value::as_str),
            entries.get("label").and_then(Value::as_str),
        ) {
            (Some(url), Some(label)) => {
                body.push_str(&format!("<a href=\"{}\">{}</a>", url, label));
                if let Some(detail) = entries.get("detail").and_then(Value::as_str) {
                    if !detail.is_empty() {
                        body.push_str(&format!(" ({})", detail));
                    }
                }
            }
            _ => {
                for (name, entry) in entries {
                    body.push_str(&format!("<span class=\"{}\">{}</span> ", name, scalar(entry)));
                }
            }
        }
    } else {
        body.push_str(&scalar(item));
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
