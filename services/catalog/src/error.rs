use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use catcollector_domain::form::FieldErrors;

/// Catalog service error variants.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("cat not found")]
    CatNotFound,
    #[error("cat toy not found")]
    CatToyNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("invalid form data")]
    Invalid(#[from] FieldErrors),
    #[error("a user with that username already exists")]
    UsernameTaken,
    #[error("please enter a correct username and password")]
    InvalidCredentials,
    #[error("this account is inactive")]
    AccountDisabled,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl CatalogError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CatNotFound => "CAT_NOT_FOUND",
            Self::CatToyNotFound => "CAT_TOY_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::Invalid(_) => "INVALID_FORM",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AccountDisabled => "ACCOUNT_DISABLED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::CatNotFound | Self::CatToyNotFound | Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UsernameTaken => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::AccountDisabled => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::Invalid(ref errors) = self {
            body["errors"] = serde_json::to_value(errors).unwrap_or_default();
        }
        (status, axum::Json(body)).into_response()
    }
}
