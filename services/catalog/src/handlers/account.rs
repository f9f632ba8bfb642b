use axum::Form;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use catcollector_core::render::Render;
use catcollector_domain::form::{FieldErrors, Mode, NON_FIELD_ERRORS};
use catcollector_session::cookie::{SESSION_COOKIE, clear_session_cookie, set_session_cookie};

use crate::domain::types::{LOGIN_FORM, SIGNUP_FORM, SessionUser};
use crate::error::CatalogError;
use crate::handlers::{FormPairs, form_page, profile_path};
use crate::session::CurrentUser;
use crate::state::AppState;
use crate::usecase::account::{
    DeleteAccountUseCase, LoginUseCase, LogoutUseCase, ProfileUseCase, SignupUseCase,
};

fn presented_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .filter(|token| !token.is_empty())
}

/// Replace any session the browser still holds, set the new cookie and send
/// the user to their profile.
async fn logged_in(
    state: &AppState,
    jar: CookieJar,
    user: SessionUser,
) -> Result<Response, CatalogError> {
    if let Some(previous) = presented_token(&jar).filter(|token| *token != user.token) {
        let usecase = LogoutUseCase {
            sessions: state.session_repo(),
        };
        usecase.execute(Some(&previous)).await?;
    }
    let location = profile_path(&user.username);
    let jar = set_session_cookie(jar, user.token, state.session_ttl_secs, state.cookie_secure);
    Ok((jar, Redirect::to(&location)).into_response())
}

// ── GET/POST /login ──────────────────────────────────────────────────────────

pub async fn login_form() -> Render {
    form_page("login.html", &LOGIN_FORM, &[], &FieldErrors::new(), Mode::Create)
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(input): FormPairs,
) -> Result<Response, CatalogError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        sessions: state.session_repo(),
        session_ttl_secs: state.session_ttl_secs,
    };
    match usecase.execute(&input).await {
        Ok(user) => logged_in(&state, jar, user).await,
        Err(CatalogError::Invalid(errors)) => {
            Ok(form_page("login.html", &LOGIN_FORM, &input, &errors, Mode::Create).into_response())
        }
        Err(e @ (CatalogError::InvalidCredentials | CatalogError::AccountDisabled)) => {
            let username = input
                .iter()
                .find(|(key, _)| key == "username")
                .map(|(_, value)| value.trim())
                .unwrap_or_default();
            tracing::warn!(username = %username, kind = e.kind(), "login failed");
            let errors = FieldErrors::single(NON_FIELD_ERRORS, e.to_string());
            Ok(form_page("login.html", &LOGIN_FORM, &input, &errors, Mode::Create)
                .with_status(StatusCode::UNAUTHORIZED)
                .into_response())
        }
        Err(e) => Err(e),
    }
}

// ── GET/POST /logout ─────────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), CatalogError> {
    let token = presented_token(&jar);
    let usecase = LogoutUseCase {
        sessions: state.session_repo(),
    };
    usecase.execute(token.as_deref()).await?;
    let jar = clear_session_cookie(jar, state.cookie_secure);
    Ok((jar, Redirect::to("/cats")))
}

// ── GET/POST /signup ─────────────────────────────────────────────────────────

pub async fn signup_form() -> Render {
    form_page("signup.html", &SIGNUP_FORM, &[], &FieldErrors::new(), Mode::Create)
}

pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(input): FormPairs,
) -> Result<Response, CatalogError> {
    let usecase = SignupUseCase {
        users: state.user_repo(),
        sessions: state.session_repo(),
        session_ttl_secs: state.session_ttl_secs,
    };
    match usecase.execute(&input).await {
        Ok(user) => logged_in(&state, jar, user).await,
        Err(CatalogError::Invalid(errors)) => {
            Ok(form_page("signup.html", &SIGNUP_FORM, &input, &errors, Mode::Create).into_response())
        }
        Err(e) => Err(e),
    }
}

// ── GET /user/{username} ─────────────────────────────────────────────────────

pub async fn profile(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Render, CatalogError> {
    let usecase = ProfileUseCase {
        users: state.user_repo(),
        cats: state.cat_repo(),
    };
    let profile = usecase.execute(&username).await?;
    let is_self = profile.username == user.username;
    Ok(Render::new("profile.html")
        .with("profile", profile)
        .with("user", user)
        .with("is_self", is_self))
}

// ── POST /user/{username}/delete ─────────────────────────────────────────────

pub async fn delete_account(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    jar: CookieJar,
    Path(username): Path<String>,
) -> Result<(CookieJar, Redirect), CatalogError> {
    let usecase = DeleteAccountUseCase {
        users: state.user_repo(),
    };
    usecase.execute(&user, &username).await?;
    let jar = clear_session_cookie(jar, state.cookie_secure);
    Ok((jar, Redirect::to("/cats")))
}
