use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::infra::db::{DbCatRepository, DbCatToyRepository, DbSessionRepository, DbUserRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub cookie_secure: bool,
    pub session_ttl_secs: u64,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn cat_repo(&self) -> DbCatRepository {
        DbCatRepository {
            db: self.db.clone(),
        }
    }

    pub fn cat_toy_repo(&self) -> DbCatToyRepository {
        DbCatToyRepository {
            db: self.db.clone(),
        }
    }

    pub fn session_repo(&self) -> DbSessionRepository {
        DbSessionRepository {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
