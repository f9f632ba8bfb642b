//! Render instructions handed to the external view renderer.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

/// A template name plus the context mapping it is rendered with.
///
/// Serialized as `{"template": "...", "context": {...}}`. HTML production is
/// the renderer's job; handlers only decide *what* to show.
#[derive(Debug, Clone)]
pub struct Render {
    template: &'static str,
    context: Map<String, Value>,
    status: StatusCode,
}

impl Render {
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            context: Map::new(),
            status: StatusCode::OK,
        }
    }

    /// Insert one context entry. Values that fail to serialize become `null`.
    pub fn with(mut self, key: &str, value: impl ::serde::Serialize) -> Self {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    template = self.template,
                    key = %key,
                    error = %e,
                    "render context value failed to serialize"
                );
                Value::Null
            }
        };
        self.context.insert(key.to_owned(), value);
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn context(&self) -> &Map<String, Value> {
        &self.context
    }
}

impl IntoResponse for Render {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "template": self.template,
            "context": Value::Object(self.context),
        });
        (self.status, Json(body)).into_response()
    }
}
