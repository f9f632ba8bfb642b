use chrono::{DateTime, Utc};
use serde::Serialize;

use catcollector_domain::form::{FieldSpec, FormSchema};
use catcollector_domain::id::{CatId, CatToyId, UserId};

/// A registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
}

/// A cat record owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cat {
    pub id: CatId,
    pub owner: UserId,
    pub name: String,
    pub breed: String,
    pub description: String,
    pub age: i32,
}

#[derive(Debug, Clone)]
pub struct NewCat {
    pub owner: UserId,
    pub name: String,
    pub breed: String,
    pub description: String,
    pub age: i32,
}

/// Partial cat update. `None` leaves the field unchanged; `toys` replaces the whole set.
#[derive(Debug, Clone, Default)]
pub struct CatChanges {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub description: Option<String>,
    pub age: Option<i32>,
    pub toys: Option<Vec<CatToyId>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatToy {
    pub id: CatToyId,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct NewCatToy {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Default)]
pub struct CatToyChanges {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// A cat with its toy set and every toy it does not have yet, both ordered by id.
#[derive(Debug, Clone, Serialize)]
pub struct CatDetail {
    pub cat: Cat,
    pub toys: Vec<CatToy>,
    pub available_toys: Vec<CatToy>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CatFilter {
    pub owner: Option<UserId>,
}

/// Server-side session row.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// The identity bound to the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub id: UserId,
    pub username: String,
    #[serde(skip)]
    pub token: String,
}

// ── Form schemas ─────────────────────────────────────────────────────────────

pub static CAT_FORM: FormSchema = FormSchema::new(&[
    FieldSpec::text("name", 100),
    FieldSpec::text("breed", 100),
    FieldSpec::text("description", 250),
    FieldSpec::non_negative_int("age"),
]);

pub static CAT_EDIT_FORM: FormSchema = FormSchema::new(&[
    FieldSpec::text("name", 100),
    FieldSpec::text("breed", 100),
    FieldSpec::text("description", 250),
    FieldSpec::non_negative_int("age"),
    FieldSpec::id_set("toys"),
]);

pub static CAT_TOY_FORM: FormSchema = FormSchema::new(&[
    FieldSpec::text("name", 100),
    FieldSpec::text("color", 50),
]);

pub static LOGIN_FORM: FormSchema = FormSchema::new(&[
    FieldSpec::text("username", USERNAME_MAX_LEN),
    FieldSpec::secret("password", PASSWORD_MAX_LEN),
]);

pub static SIGNUP_FORM: FormSchema = FormSchema::new(&[
    FieldSpec::text("username", USERNAME_MAX_LEN),
    FieldSpec::secret("password1", PASSWORD_MAX_LEN),
    FieldSpec::secret("password2", PASSWORD_MAX_LEN),
]);

// ── Account rules ────────────────────────────────────────────────────────────

/// Field error for a submitted toy id with no matching toy.
pub fn invalid_toy_choice(id: CatToyId) -> String {
    format!("Select a valid choice. {id} is not one of the available choices.")
}

pub const USERNAME_MAX_LEN: usize = 150;
pub const PASSWORD_MAX_LEN: usize = 128;
pub const PASSWORD_MIN_LEN: usize = 8;

/// Usernames may contain letters, digits and `@.+-_`.
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    let valid = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if valid {
        Ok(())
    } else {
        Err("Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.")
    }
}

/// Every password-policy violation, in a stable order.
pub fn password_problems(password: &str, username: &str) -> Vec<String> {
    let mut problems = Vec::new();
    if password.chars().count() < PASSWORD_MIN_LEN {
        problems.push(format!(
            "This password is too short. It must contain at least {PASSWORD_MIN_LEN} characters."
        ));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        problems.push("This password is entirely numeric.".to_owned());
    }
    if password.to_lowercase() == username.to_lowercase() {
        problems.push("The password is too similar to the username.".to_owned());
    }
    problems
}
