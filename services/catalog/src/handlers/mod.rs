pub mod account;
pub mod cat;
pub mod cat_toy;
pub mod pages;

use axum::Form;
use axum::http::StatusCode;

use catcollector_core::render::Render;
use catcollector_domain::form::{FieldErrors, FormSchema, Mode};

/// Submitted form body as ordered pairs. Keys may repeat.
pub type FormPairs = Form<Vec<(String, String)>>;

/// Render a form page. Pages carrying errors are answered with 422.
pub(crate) fn form_page(
    template: &'static str,
    schema: &FormSchema,
    values: &[(String, String)],
    errors: &FieldErrors,
    mode: Mode,
) -> Render {
    let status = if errors.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    Render::new(template)
        .with("form", schema.describe(values, errors, mode))
        .with_status(status)
}

/// Location of a user's profile page.
pub(crate) fn profile_path(username: &str) -> String {
    format!("/user/{}", urlencoding::encode(username))
}
