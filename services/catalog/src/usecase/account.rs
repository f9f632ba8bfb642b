use anyhow::Context as _;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use catcollector_domain::form::{FieldErrors, Mode};
use catcollector_session::token::generate_session_token;

use crate::domain::repository::{CatRepository, SessionRepository, UserRepository};
use crate::domain::types::{
    Cat, CatFilter, LOGIN_FORM, NewUser, SIGNUP_FORM, Session, SessionUser, User,
    password_problems, validate_username,
};
use crate::error::CatalogError;
use crate::usecase::password::{dummy_hash, hash_password, verify_password};

const USERNAME_TAKEN: &str = "A user with that username already exists.";

/// Store a fresh session for `user` and return the identity bound to it.
///
/// Expired sessions of every user are purged first.
async fn open_session<S: SessionRepository>(
    sessions: &S,
    user: &User,
    ttl_secs: u64,
) -> Result<SessionUser, CatalogError> {
    let now = Utc::now();
    let purged = sessions.delete_expired(now).await?;
    if purged > 0 {
        tracing::debug!(purged, "expired sessions deleted");
    }
    let session = Session {
        token: generate_session_token(),
        user_id: user.id,
        created_at: now,
        expires_at: now + Duration::seconds(ttl_secs as i64),
    };
    sessions.create(&session).await?;
    Ok(SessionUser {
        id: user.id,
        username: user.username.clone(),
        token: session.token,
    })
}

// ── Signup ───────────────────────────────────────────────────────────────────

pub struct SignupUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub users: U,
    pub sessions: S,
    pub session_ttl_secs: u64,
}

impl<U, S> SignupUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    /// Register a new account and log it in.
    pub async fn execute(&self, input: &[(String, String)]) -> Result<SessionUser, CatalogError> {
        let mut data = SIGNUP_FORM.clean(input, Mode::Create)?;
        let username = data.take_text("username").unwrap_or_default();
        let password1 = data.take_text("password1").unwrap_or_default();
        let password2 = data.take_text("password2").unwrap_or_default();

        let mut errors = FieldErrors::new();
        if let Err(message) = validate_username(&username) {
            errors.add("username", message);
        }
        if password1 != password2 {
            errors.add("password2", "The two password fields didn't match.");
        } else {
            for problem in password_problems(&password2, &username) {
                errors.add("password2", problem);
            }
        }
        errors.into_result(())?;

        if self.users.find_by_username(&username).await?.is_some() {
            return Err(FieldErrors::single("username", USERNAME_TAKEN).into());
        }

        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password1))
            .await
            .context("join password hasher")??;
        let user = match self
            .users
            .create(&NewUser {
                username,
                password_hash,
                date_joined: Utc::now(),
            })
            .await
        {
            Ok(user) => user,
            Err(CatalogError::UsernameTaken) => {
                return Err(FieldErrors::single("username", USERNAME_TAKEN).into());
            }
            Err(e) => return Err(e),
        };
        tracing::info!(user_id = %user.id, username = %user.username, "user signed up");

        open_session(&self.sessions, &user, self.session_ttl_secs).await
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub users: U,
    pub sessions: S,
    pub session_ttl_secs: u64,
}

impl<U, S> LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    /// Check credentials and open a session.
    ///
    /// Unknown usernames and wrong passwords both fail with `InvalidCredentials`.
    pub async fn execute(&self, input: &[(String, String)]) -> Result<SessionUser, CatalogError> {
        let mut data = LOGIN_FORM.clean(input, Mode::Create)?;
        let username = data.take_text("username").unwrap_or_default();
        let password = data.take_text("password").unwrap_or_default();

        let user = self.users.find_by_username(&username).await?;
        let stored = user.as_ref().map(|user| user.password_hash.clone());
        let matches = tokio::task::spawn_blocking(move || match stored {
            Some(stored) => verify_password(&password, &stored),
            None => {
                if let Some(dummy) = dummy_hash() {
                    verify_password(&password, dummy);
                }
                false
            }
        })
        .await
        .context("join password verifier")?;
        let Some(user) = user.filter(|_| matches) else {
            return Err(CatalogError::InvalidCredentials);
        };
        if !user.is_active {
            return Err(CatalogError::AccountDisabled);
        }

        let session_user = open_session(&self.sessions, &user, self.session_ttl_secs).await?;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok(session_user)
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<S: SessionRepository> {
    pub sessions: S,
}

impl<S: SessionRepository> LogoutUseCase<S> {
    /// Destroy the session behind `token`, if any.
    pub async fn execute(&self, token: Option<&str>) -> Result<(), CatalogError> {
        if let Some(token) = token {
            self.sessions.delete(token).await?;
        }
        Ok(())
    }
}

// ── ResolveSession ───────────────────────────────────────────────────────────

pub struct ResolveSessionUseCase<S, U>
where
    S: SessionRepository,
    U: UserRepository,
{
    pub sessions: S,
    pub users: U,
}

impl<S, U> ResolveSessionUseCase<S, U>
where
    S: SessionRepository,
    U: UserRepository,
{
    /// Map a session token to its active user. Expired sessions are deleted.
    pub async fn execute(&self, token: &str) -> Result<Option<SessionUser>, CatalogError> {
        let Some(session) = self.sessions.find(token).await? else {
            return Ok(None);
        };
        if session.is_expired(Utc::now()) {
            self.sessions.delete(token).await?;
            return Ok(None);
        }
        let Some(user) = self.users.find_by_id(session.user_id).await? else {
            return Ok(None);
        };
        if !user.is_active {
            return Ok(None);
        }
        Ok(Some(SessionUser {
            id: user.id,
            username: user.username,
            token: session.token,
        }))
    }
}

// ── Profile ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub username: String,
    #[serde(serialize_with = "catcollector_core::serde::to_rfc3339_ms")]
    pub date_joined: DateTime<Utc>,
    pub cats: Vec<Cat>,
}

pub struct ProfileUseCase<U, C>
where
    U: UserRepository,
    C: CatRepository,
{
    pub users: U,
    pub cats: C,
}

impl<U, C> ProfileUseCase<U, C>
where
    U: UserRepository,
    C: CatRepository,
{
    pub async fn execute(&self, username: &str) -> Result<Profile, CatalogError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(CatalogError::UserNotFound)?;
        let cats = self
            .cats
            .list(CatFilter {
                owner: Some(user.id),
            })
            .await?;
        Ok(Profile {
            username: user.username,
            date_joined: user.date_joined,
            cats,
        })
    }
}

// ── DeleteAccount ────────────────────────────────────────────────────────────

pub struct DeleteAccountUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> DeleteAccountUseCase<U> {
    /// Delete the caller's own account with every cat and session it owns.
    pub async fn execute(&self, current: &SessionUser, username: &str) -> Result<(), CatalogError> {
        if current.username != username {
            return Err(CatalogError::Forbidden);
        }
        if !self.users.delete(current.id).await? {
            return Err(CatalogError::UserNotFound);
        }
        tracing::info!(user_id = %current.id, "account deleted");
        Ok(())
    }
}
