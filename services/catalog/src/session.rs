//! Request-scoped identity resolved from the session cookie.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};

use catcollector_session::cookie::session_token;
use catcollector_session::token::is_well_formed;

use crate::domain::types::SessionUser;
use crate::error::CatalogError;
use crate::state::AppState;
use crate::usecase::account::ResolveSessionUseCase;

/// Where anonymous requests to protected routes are sent.
pub const LOGIN_PATH: &str = "/login";

/// The logged-in user. Rejects anonymous requests with a redirect to `/login`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

async fn resolve(state: AppState, token: Option<String>) -> Result<Option<SessionUser>, CatalogError> {
    let Some(token) = token.filter(|t| is_well_formed(t)) else {
        return Ok(None);
    };
    let usecase = ResolveSessionUseCase {
        sessions: state.session_repo(),
        users: state.user_repo(),
    };
    usecase.execute(&token).await
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    // Values are extracted synchronously so the returned future does not
    // borrow `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = session_token(&parts.headers);
        let state = state.clone();
        let path = parts.uri.path().to_owned();

        async move {
            match resolve(state, token).await {
                Ok(Some(user)) => Ok(Self(user)),
                Ok(None) => {
                    tracing::debug!(path = %path, "anonymous request redirected to login");
                    Err(Redirect::to(LOGIN_PATH).into_response())
                }
                Err(e) => Err(e.into_response()),
            }
        }
    }
}

impl OptionalFromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let token = session_token(&parts.headers);
        let state = state.clone();

        async move {
            match resolve(state, token).await {
                Ok(user) => Ok(user.map(Self)),
                Err(e) => Err(e.into_response()),
            }
        }
    }
}
