use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel as _, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, SqlErr,
    TransactionTrait, sea_query::OnConflict,
};

use catcollector_catalog_schema::{cat_toys, cats, cats_cat_toys, sessions, users};
use catcollector_domain::form::FieldErrors;
use catcollector_domain::id::{CatId, CatToyId, UserId};

use crate::domain::repository::{
    CatRepository, CatToyRepository, SessionRepository, UserRepository,
};
use crate::domain::types::{
    Cat, CatChanges, CatFilter, CatToy, CatToyChanges, NewCat, NewCatToy, NewUser, Session, User,
    invalid_toy_choice,
};
use crate::error::CatalogError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, CatalogError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CatalogError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &NewUser) -> Result<User, CatalogError> {
        let result = users::ActiveModel {
            username: Set(user.username.clone()),
            password_hash: Set(user.password_hash.clone()),
            is_active: Set(true),
            date_joined: Set(user.date_joined),
            ..Default::default()
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(model) => Ok(user_from_model(model)),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(CatalogError::UsernameTaken)
            }
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn delete(&self, id: UserId) -> Result<bool, CatalogError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let cat_ids: Vec<i32> = cats::Entity::find()
                        .select_only()
                        .column(cats::Column::Id)
                        .filter(cats::Column::UserId.eq(id.0))
                        .into_tuple()
                        .all(txn)
                        .await?;
                    if !cat_ids.is_empty() {
                        cats_cat_toys::Entity::delete_many()
                            .filter(cats_cat_toys::Column::CatId.is_in(cat_ids))
                            .exec(txn)
                            .await?;
                    }
                    cats::Entity::delete_many()
                        .filter(cats::Column::UserId.eq(id.0))
                        .exec(txn)
                        .await?;
                    sessions::Entity::delete_many()
                        .filter(sessions::Column::UserId.eq(id.0))
                        .exec(txn)
                        .await?;
                    let res = users::Entity::delete_by_id(id.0).exec(txn).await?;
                    Ok(res.rows_affected > 0)
                })
            })
            .await
            .context("delete user")?;
        Ok(deleted)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: UserId(model.id),
        username: model.username,
        password_hash: model.password_hash,
        is_active: model.is_active,
        date_joined: model.date_joined,
    }
}

// ── Cat repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCatRepository {
    pub db: DatabaseConnection,
}

enum LinkOutcome {
    Linked,
    MissingCat,
    MissingToy,
}

enum UpdateOutcome {
    Updated,
    MissingCat,
    MissingToys(Vec<CatToyId>),
}

impl CatRepository for DbCatRepository {
    async fn list(&self, filter: CatFilter) -> Result<Vec<Cat>, CatalogError> {
        let mut query = cats::Entity::find().order_by_asc(cats::Column::Id);
        if let Some(owner) = filter.owner {
            query = query.filter(cats::Column::UserId.eq(owner.0));
        }
        let models = query.all(&self.db).await.context("list cats")?;
        Ok(models.into_iter().map(cat_from_model).collect())
    }

    async fn find_by_id(&self, id: CatId) -> Result<Option<Cat>, CatalogError> {
        let model = cats::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find cat by id")?;
        Ok(model.map(cat_from_model))
    }

    async fn create(&self, cat: &NewCat) -> Result<Cat, CatalogError> {
        let model = cats::ActiveModel {
            user_id: Set(cat.owner.0),
            name: Set(cat.name.clone()),
            breed: Set(cat.breed.clone()),
            description: Set(cat.description.clone()),
            age: Set(cat.age),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create cat")?;
        Ok(cat_from_model(model))
    }

    async fn update(&self, id: CatId, changes: &CatChanges) -> Result<bool, CatalogError> {
        let changes = changes.clone();
        let outcome = self
            .db
            .transaction::<_, UpdateOutcome, DbErr>(|txn| {
                Box::pin(async move {
                    let Some(model) = cats::Entity::find_by_id(id.0).one(txn).await? else {
                        return Ok(UpdateOutcome::MissingCat);
                    };
                    // Shared row locks keep the chosen toys alive until commit.
                    if let Some(toys) = changes.toys.as_deref().filter(|toys| !toys.is_empty()) {
                        let found: Vec<i32> = cat_toys::Entity::find()
                            .select_only()
                            .column(cat_toys::Column::Id)
                            .filter(cat_toys::Column::Id.is_in(toys.iter().map(|toy| toy.0)))
                            .lock_shared()
                            .into_tuple()
                            .all(txn)
                            .await?;
                        let missing: Vec<CatToyId> = toys
                            .iter()
                            .copied()
                            .filter(|toy| !found.contains(&toy.0))
                            .collect();
                        if !missing.is_empty() {
                            return Ok(UpdateOutcome::MissingToys(missing));
                        }
                    }
                    let mut am = model.into_active_model();
                    if let Some(name) = changes.name {
                        am.name = Set(name);
                    }
                    if let Some(breed) = changes.breed {
                        am.breed = Set(breed);
                    }
                    if let Some(description) = changes.description {
                        am.description = Set(description);
                    }
                    if let Some(age) = changes.age {
                        am.age = Set(age);
                    }
                    if am.is_changed() {
                        am.update(txn).await?;
                    }

                    if let Some(toys) = changes.toys {
                        cats_cat_toys::Entity::delete_many()
                            .filter(cats_cat_toys::Column::CatId.eq(id.0))
                            .exec(txn)
                            .await?;
                        if !toys.is_empty() {
                            cats_cat_toys::Entity::insert_many(toys.iter().map(|toy| {
                                cats_cat_toys::ActiveModel {
                                    cat_id: Set(id.0),
                                    cat_toy_id: Set(toy.0),
                                }
                            }))
                            .exec_without_returning(txn)
                            .await?;
                        }
                    }
                    Ok(UpdateOutcome::Updated)
                })
            })
            .await
            .context("update cat")?;
        match outcome {
            UpdateOutcome::Updated => Ok(true),
            UpdateOutcome::MissingCat => Ok(false),
            UpdateOutcome::MissingToys(missing) => {
                let mut errors = FieldErrors::new();
                for toy in missing {
                    errors.add("toys", invalid_toy_choice(toy));
                }
                Err(errors.into())
            }
        }
    }

    async fn delete(&self, id: CatId) -> Result<bool, CatalogError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    cats_cat_toys::Entity::delete_many()
                        .filter(cats_cat_toys::Column::CatId.eq(id.0))
                        .exec(txn)
                        .await?;
                    let res = cats::Entity::delete_by_id(id.0).exec(txn).await?;
                    Ok(res.rows_affected > 0)
                })
            })
            .await
            .context("delete cat")?;
        Ok(deleted)
    }

    async fn toys_of(&self, id: CatId) -> Result<Vec<CatToy>, CatalogError> {
        let models = cat_toys::Entity::find()
            .join(JoinType::InnerJoin, cat_toys::Relation::CatsCatToys.def())
            .filter(cats_cat_toys::Column::CatId.eq(id.0))
            .order_by_asc(cat_toys::Column::Id)
            .all(&self.db)
            .await
            .context("list toys of cat")?;
        Ok(models.into_iter().map(cat_toy_from_model).collect())
    }

    async fn add_toy(&self, cat: CatId, toy: CatToyId) -> Result<(), CatalogError> {
        let outcome = self
            .db
            .transaction::<_, LinkOutcome, DbErr>(|txn| {
                Box::pin(async move {
                    if cats::Entity::find_by_id(cat.0).one(txn).await?.is_none() {
                        return Ok(LinkOutcome::MissingCat);
                    }
                    if cat_toys::Entity::find_by_id(toy.0).one(txn).await?.is_none() {
                        return Ok(LinkOutcome::MissingToy);
                    }
                    cats_cat_toys::Entity::insert(cats_cat_toys::ActiveModel {
                        cat_id: Set(cat.0),
                        cat_toy_id: Set(toy.0),
                    })
                    .on_conflict(
                        OnConflict::columns([
                            cats_cat_toys::Column::CatId,
                            cats_cat_toys::Column::CatToyId,
                        ])
                        .do_nothing()
                        .to_owned(),
                    )
                    .exec_without_returning(txn)
                    .await?;
                    Ok(LinkOutcome::Linked)
                })
            })
            .await
            .context("add toy to cat")?;
        match outcome {
            LinkOutcome::Linked => Ok(()),
            LinkOutcome::MissingCat => Err(CatalogError::CatNotFound),
            LinkOutcome::MissingToy => Err(CatalogError::CatToyNotFound),
        }
    }

    async fn remove_toy(&self, cat: CatId, toy: CatToyId) -> Result<(), CatalogError> {
        let exists = cats::Entity::find_by_id(cat.0)
            .one(&self.db)
            .await
            .context("find cat by id")?
            .is_some();
        if !exists {
            return Err(CatalogError::CatNotFound);
        }
        cats_cat_toys::Entity::delete_many()
            .filter(cats_cat_toys::Column::CatId.eq(cat.0))
            .filter(cats_cat_toys::Column::CatToyId.eq(toy.0))
            .exec(&self.db)
            .await
            .context("remove toy from cat")?;
        Ok(())
    }
}

fn cat_from_model(model: cats::Model) -> Cat {
    Cat {
        id: CatId(model.id),
        owner: UserId(model.user_id),
        name: model.name,
        breed: model.breed,
        description: model.description,
        age: model.age,
    }
}

// ── Cat toy repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCatToyRepository {
    pub db: DatabaseConnection,
}

impl CatToyRepository for DbCatToyRepository {
    async fn list(&self) -> Result<Vec<CatToy>, CatalogError> {
        let models = cat_toys::Entity::find()
            .order_by_asc(cat_toys::Column::Id)
            .all(&self.db)
            .await
            .context("list cat toys")?;
        Ok(models.into_iter().map(cat_toy_from_model).collect())
    }

    async fn find_by_id(&self, id: CatToyId) -> Result<Option<CatToy>, CatalogError> {
        let model = cat_toys::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find cat toy by id")?;
        Ok(model.map(cat_toy_from_model))
    }

    async fn find_many(&self, ids: &[CatToyId]) -> Result<Vec<CatToy>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = cat_toys::Entity::find()
            .filter(cat_toys::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .order_by_asc(cat_toys::Column::Id)
            .all(&self.db)
            .await
            .context("find cat toys by ids")?;
        Ok(models.into_iter().map(cat_toy_from_model).collect())
    }

    async fn list_excluding(&self, ids: &[CatToyId]) -> Result<Vec<CatToy>, CatalogError> {
        let mut query = cat_toys::Entity::find().order_by_asc(cat_toys::Column::Id);
        if !ids.is_empty() {
            query = query.filter(cat_toys::Column::Id.is_not_in(ids.iter().map(|id| id.0)));
        }
        let models = query
            .all(&self.db)
            .await
            .context("list cat toys excluding ids")?;
        Ok(models.into_iter().map(cat_toy_from_model).collect())
    }

    async fn create(&self, toy: &NewCatToy) -> Result<CatToy, CatalogError> {
        let model = cat_toys::ActiveModel {
            name: Set(toy.name.clone()),
            color: Set(toy.color.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create cat toy")?;
        Ok(cat_toy_from_model(model))
    }

    async fn update(&self, id: CatToyId, changes: &CatToyChanges) -> Result<bool, CatalogError> {
        let Some(model) = cat_toys::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find cat toy by id")?
        else {
            return Ok(false);
        };
        let mut am = model.into_active_model();
        if let Some(name) = &changes.name {
            am.name = Set(name.clone());
        }
        if let Some(color) = &changes.color {
            am.color = Set(color.clone());
        }
        if am.is_changed() {
            am.update(&self.db).await.context("update cat toy")?;
        }
        Ok(true)
    }

    async fn delete(&self, id: CatToyId) -> Result<bool, CatalogError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    cats_cat_toys::Entity::delete_many()
                        .filter(cats_cat_toys::Column::CatToyId.eq(id.0))
                        .exec(txn)
                        .await?;
                    let res = cat_toys::Entity::delete_by_id(id.0).exec(txn).await?;
                    Ok(res.rows_affected > 0)
                })
            })
            .await
            .context("delete cat toy")?;
        Ok(deleted)
    }
}

fn cat_toy_from_model(model: cat_toys::Model) -> CatToy {
    CatToy {
        id: CatToyId(model.id),
        name: model.name,
        color: model.color,
    }
}

// ── Session repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSessionRepository {
    pub db: DatabaseConnection,
}

impl SessionRepository for DbSessionRepository {
    async fn create(&self, session: &Session) -> Result<(), CatalogError> {
        sessions::ActiveModel {
            token: Set(session.token.clone()),
            user_id: Set(session.user_id.0),
            created_at: Set(session.created_at),
            expires_at: Set(session.expires_at),
        }
        .insert(&self.db)
        .await
        .context("create session")?;
        Ok(())
    }

    async fn find(&self, token: &str) -> Result<Option<Session>, CatalogError> {
        let model = sessions::Entity::find_by_id(token.to_owned())
            .one(&self.db)
            .await
            .context("find session")?;
        Ok(model.map(session_from_model))
    }

    async fn delete(&self, token: &str) -> Result<bool, CatalogError> {
        let res = sessions::Entity::delete_by_id(token.to_owned())
            .exec(&self.db)
            .await
            .context("delete session")?;
        Ok(res.rows_affected > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, CatalogError> {
        let res = sessions::Entity::delete_many()
            .filter(sessions::Column::ExpiresAt.lte(now))
            .exec(&self.db)
            .await
            .context("delete expired sessions")?;
        Ok(res.rows_affected)
    }
}

fn session_from_model(model: sessions::Model) -> Session {
    Session {
        token: model.token,
        user_id: UserId(model.user_id),
        created_at: model.created_at,
        expires_at: model.expires_at,
    }
}
