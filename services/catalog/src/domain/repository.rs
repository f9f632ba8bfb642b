#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use catcollector_domain::id::{CatId, CatToyId, UserId};

use crate::domain::types::{
    Cat, CatChanges, CatFilter, CatToy, CatToyChanges, NewCat, NewCatToy, NewUser, Session, User,
};
use crate::error::CatalogError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, CatalogError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CatalogError>;
    /// Fails with `UsernameTaken` when the username is already registered.
    async fn create(&self, user: &NewUser) -> Result<User, CatalogError>;
    /// Delete a user with their cats and sessions. Returns `true` if a row was deleted.
    async fn delete(&self, id: UserId) -> Result<bool, CatalogError>;
}

/// Repository for cats and their toy sets.
pub trait CatRepository: Send + Sync {
    /// Cats matching `filter`, ordered by id.
    async fn list(&self, filter: CatFilter) -> Result<Vec<Cat>, CatalogError>;
    async fn find_by_id(&self, id: CatId) -> Result<Option<Cat>, CatalogError>;
    async fn create(&self, cat: &NewCat) -> Result<Cat, CatalogError>;
    /// Apply `changes`. Returns `false` if the cat does not exist.
    async fn update(&self, id: CatId, changes: &CatChanges) -> Result<bool, CatalogError>;
    /// Delete a cat and its toy links. Returns `true` if a row was deleted.
    async fn delete(&self, id: CatId) -> Result<bool, CatalogError>;
    /// Toys attached to the cat, ordered by id.
    async fn toys_of(&self, id: CatId) -> Result<Vec<CatToy>, CatalogError>;
    /// Attach a toy. Attaching a member again is a no-op.
    async fn add_toy(&self, cat: CatId, toy: CatToyId) -> Result<(), CatalogError>;
    /// Detach a toy. Detaching a non-member is a no-op.
    async fn remove_toy(&self, cat: CatId, toy: CatToyId) -> Result<(), CatalogError>;
}

/// Repository for cat toys.
pub trait CatToyRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<CatToy>, CatalogError>;
    async fn find_by_id(&self, id: CatToyId) -> Result<Option<CatToy>, CatalogError>;
    /// Existing toys among `ids`, ordered by id.
    async fn find_many(&self, ids: &[CatToyId]) -> Result<Vec<CatToy>, CatalogError>;
    /// All toys except `ids`, ordered by id.
    async fn list_excluding(&self, ids: &[CatToyId]) -> Result<Vec<CatToy>, CatalogError>;
    async fn create(&self, toy: &NewCatToy) -> Result<CatToy, CatalogError>;
    async fn update(&self, id: CatToyId, changes: &CatToyChanges) -> Result<bool, CatalogError>;
    /// Delete a toy and its cat links. Returns `true` if a row was deleted.
    async fn delete(&self, id: CatToyId) -> Result<bool, CatalogError>;
}

/// Repository for browser sessions.
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<(), CatalogError>;
    async fn find(&self, token: &str) -> Result<Option<Session>, CatalogError>;
    /// Returns `true` if a row was deleted.
    async fn delete(&self, token: &str) -> Result<bool, CatalogError>;
    /// Delete every session with `expires_at <= now`. Returns the number removed.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, CatalogError>;
}
