use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use catcollector_catalog::domain::repository::{
    CatRepository, CatToyRepository, SessionRepository, UserRepository,
};
use catcollector_catalog::domain::types::{
    Cat, CatChanges, CatFilter, CatToy, CatToyChanges, NewCat, NewCatToy, NewUser, Session, User,
    invalid_toy_choice,
};
use catcollector_catalog::error::CatalogError;
use catcollector_catalog::usecase::password::hash_password;
use catcollector_domain::form::FieldErrors;
use catcollector_domain::id::{CatId, CatToyId, UserId};

pub const SESSION_TTL_SECS: u64 = 3600;

/// Build form pairs from string literals.
pub fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ── MemoryStore ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct StoreData {
    pub users: Vec<User>,
    pub cats: Vec<Cat>,
    pub toys: Vec<CatToy>,
    /// (cat id, toy id) memberships.
    pub links: BTreeSet<(CatId, CatToyId)>,
    pub sessions: Vec<Session>,
    next_user_id: i32,
    next_cat_id: i32,
    next_toy_id: i32,
}

/// In-memory implementation of every repository port, shared between clones.
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub data: Arc<Mutex<StoreData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_user(&self, username: &str, password: &str) -> User {
        let mut data = self.data.lock().unwrap();
        data.next_user_id += 1;
        let user = User {
            id: UserId(data.next_user_id),
            username: username.to_owned(),
            password_hash: hash_password(password).unwrap(),
            is_active: true,
            date_joined: Utc::now(),
        };
        data.users.push(user.clone());
        user
    }

    pub fn deactivate(&self, id: UserId) {
        let mut data = self.data.lock().unwrap();
        if let Some(user) = data.users.iter_mut().find(|u| u.id == id) {
            user.is_active = false;
        }
    }

    pub fn seed_cat(&self, owner: UserId, name: &str) -> Cat {
        let mut data = self.data.lock().unwrap();
        data.next_cat_id += 1;
        let cat = Cat {
            id: CatId(data.next_cat_id),
            owner,
            name: name.to_owned(),
            breed: "Tabby".to_owned(),
            description: "A good cat".to_owned(),
            age: 2,
        };
        data.cats.push(cat.clone());
        cat
    }

    pub fn seed_toy(&self, name: &str, color: &str) -> CatToy {
        let mut data = self.data.lock().unwrap();
        data.next_toy_id += 1;
        let toy = CatToy {
            id: CatToyId(data.next_toy_id),
            name: name.to_owned(),
            color: color.to_owned(),
        };
        data.toys.push(toy.clone());
        toy
    }

    pub fn link(&self, cat: CatId, toy: CatToyId) {
        self.data.lock().unwrap().links.insert((cat, toy));
    }

    pub fn toy_ids_of(&self, cat: CatId) -> Vec<CatToyId> {
        self.data
            .lock()
            .unwrap()
            .links
            .iter()
            .filter(|(c, _)| *c == cat)
            .map(|(_, t)| *t)
            .collect()
    }

    pub fn cat(&self, id: CatId) -> Option<Cat> {
        self.data
            .lock()
            .unwrap()
            .cats
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub fn cat_ids(&self) -> Vec<CatId> {
        self.data.lock().unwrap().cats.iter().map(|c| c.id).collect()
    }

    pub fn seed_session(&self, user: UserId, token: &str, expires_at: DateTime<Utc>) {
        self.data.lock().unwrap().sessions.push(Session {
            token: token.to_owned(),
            user_id: user,
            created_at: expires_at - chrono::Duration::days(14),
            expires_at,
        });
    }

    pub fn session_tokens(&self) -> Vec<String> {
        let data = self.data.lock().unwrap();
        data.sessions.iter().map(|s| s.token.clone()).collect()
    }

    pub fn session_count(&self) -> usize {
        self.data.lock().unwrap().sessions.len()
    }
}

impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, CatalogError> {
        let data = self.data.lock().unwrap();
        Ok(data.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CatalogError> {
        let data = self.data.lock().unwrap();
        Ok(data.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, CatalogError> {
        let mut data = self.data.lock().unwrap();
        if data.users.iter().any(|u| u.username == user.username) {
            return Err(CatalogError::UsernameTaken);
        }
        data.next_user_id += 1;
        let created = User {
            id: UserId(data.next_user_id),
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            is_active: true,
            date_joined: user.date_joined,
        };
        data.users.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, id: UserId) -> Result<bool, CatalogError> {
        let mut data = self.data.lock().unwrap();
        let before = data.users.len();
        data.users.retain(|u| u.id != id);
        if data.users.len() == before {
            return Ok(false);
        }
        let owned: Vec<CatId> = data
            .cats
            .iter()
            .filter(|c| c.owner == id)
            .map(|c| c.id)
            .collect();
        data.links.retain(|(cat, _)| !owned.contains(cat));
        data.cats.retain(|c| c.owner != id);
        data.sessions.retain(|s| s.user_id != id);
        Ok(true)
    }
}

impl CatRepository for MemoryStore {
    async fn list(&self, filter: CatFilter) -> Result<Vec<Cat>, CatalogError> {
        let data = self.data.lock().unwrap();
        let mut cats: Vec<Cat> = data
            .cats
            .iter()
            .filter(|c| filter.owner.is_none_or(|owner| c.owner == owner))
            .cloned()
            .collect();
        cats.sort_by_key(|c| c.id);
        Ok(cats)
    }

    async fn find_by_id(&self, id: CatId) -> Result<Option<Cat>, CatalogError> {
        Ok(self.cat(id))
    }

    async fn create(&self, cat: &NewCat) -> Result<Cat, CatalogError> {
        let mut data = self.data.lock().unwrap();
        data.next_cat_id += 1;
        let created = Cat {
            id: CatId(data.next_cat_id),
            owner: cat.owner,
            name: cat.name.clone(),
            breed: cat.breed.clone(),
            description: cat.description.clone(),
            age: cat.age,
        };
        data.cats.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: CatId, changes: &CatChanges) -> Result<bool, CatalogError> {
        let mut data = self.data.lock().unwrap();
        if let Some(toys) = &changes.toys {
            let mut errors = FieldErrors::new();
            for toy in toys.iter().filter(|toy| !data.toys.iter().any(|t| t.id == **toy)) {
                errors.add("toys", invalid_toy_choice(*toy));
            }
            errors.into_result(())?;
        }
        let Some(cat) = data.cats.iter_mut().find(|c| c.id == id) else {
            return Ok(false);
        };
        if let Some(name) = &changes.name {
            cat.name = name.clone();
        }
        if let Some(breed) = &changes.breed {
            cat.breed = breed.clone();
        }
        if let Some(description) = &changes.description {
            cat.description = description.clone();
        }
        if let Some(age) = changes.age {
            cat.age = age;
        }
        if let Some(toys) = &changes.toys {
            data.links.retain(|(cat, _)| *cat != id);
            data.links.extend(toys.iter().map(|toy| (id, *toy)));
        }
        Ok(true)
    }

    async fn delete(&self, id: CatId) -> Result<bool, CatalogError> {
        let mut data = self.data.lock().unwrap();
        let before = data.cats.len();
        data.cats.retain(|c| c.id != id);
        data.links.retain(|(cat, _)| *cat != id);
        Ok(data.cats.len() < before)
    }

    async fn toys_of(&self, id: CatId) -> Result<Vec<CatToy>, CatalogError> {
        let data = self.data.lock().unwrap();
        let mut toys: Vec<CatToy> = data
            .toys
            .iter()
            .filter(|t| data.links.contains(&(id, t.id)))
            .cloned()
            .collect();
        toys.sort_by_key(|t| t.id);
        Ok(toys)
    }

    async fn add_toy(&self, cat: CatId, toy: CatToyId) -> Result<(), CatalogError> {
        let mut data = self.data.lock().unwrap();
        if !data.cats.iter().any(|c| c.id == cat) {
            return Err(CatalogError::CatNotFound);
        }
        if !data.toys.iter().any(|t| t.id == toy) {
            return Err(CatalogError::CatToyNotFound);
        }
        data.links.insert((cat, toy));
        Ok(())
    }

    async fn remove_toy(&self, cat: CatId, toy: CatToyId) -> Result<(), CatalogError> {
        let mut data = self.data.lock().unwrap();
        if !data.cats.iter().any(|c| c.id == cat) {
            return Err(CatalogError::CatNotFound);
        }
        data.links.remove(&(cat, toy));
        Ok(())
    }
}

impl CatToyRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<CatToy>, CatalogError> {
        let mut toys = self.data.lock().unwrap().toys.clone();
        toys.sort_by_key(|t| t.id);
        Ok(toys)
    }

    async fn find_by_id(&self, id: CatToyId) -> Result<Option<CatToy>, CatalogError> {
        let data = self.data.lock().unwrap();
        Ok(data.toys.iter().find(|t| t.id == id).cloned())
    }

    async fn find_many(&self, ids: &[CatToyId]) -> Result<Vec<CatToy>, CatalogError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .toys
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn list_excluding(&self, ids: &[CatToyId]) -> Result<Vec<CatToy>, CatalogError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .toys
            .iter()
            .filter(|t| !ids.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn create(&self, toy: &NewCatToy) -> Result<CatToy, CatalogError> {
        let mut data = self.data.lock().unwrap();
        data.next_toy_id += 1;
        let created = CatToy {
            id: CatToyId(data.next_toy_id),
            name: toy.name.clone(),
            color: toy.color.clone(),
        };
        data.toys.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: CatToyId, changes: &CatToyChanges) -> Result<bool, CatalogError> {
        let mut data = self.data.lock().unwrap();
        let Some(toy) = data.toys.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        if let Some(name) = &changes.name {
            toy.name = name.clone();
        }
        if let Some(color) = &changes.color {
            toy.color = color.clone();
        }
        Ok(true)
    }

    async fn delete(&self, id: CatToyId) -> Result<bool, CatalogError> {
        let mut data = self.data.lock().unwrap();
        let before = data.toys.len();
        data.toys.retain(|t| t.id != id);
        data.links.retain(|(_, toy)| *toy != id);
        Ok(data.toys.len() < before)
    }
}

impl SessionRepository for MemoryStore {
    async fn create(&self, session: &Session) -> Result<(), CatalogError> {
        self.data.lock().unwrap().sessions.push(session.clone());
        Ok(())
    }

    async fn find(&self, token: &str) -> Result<Option<Session>, CatalogError> {
        let data = self.data.lock().unwrap();
        Ok(data.sessions.iter().find(|s| s.token == token).cloned())
    }

    async fn delete(&self, token: &str) -> Result<bool, CatalogError> {
        let mut data = self.data.lock().unwrap();
        let before = data.sessions.len();
        data.sessions.retain(|s| s.token != token);
        Ok(data.sessions.len() < before)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, CatalogError> {
        let mut data = self.data.lock().unwrap();
        let before = data.sessions.len();
        data.sessions.retain(|s| !s.is_expired(now));
        Ok((before - data.sessions.len()) as u64)
    }
}
