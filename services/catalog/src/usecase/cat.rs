use catcollector_domain::form::{FieldErrors, Mode};
use catcollector_domain::id::{CatId, CatToyId, UserId};

use crate::domain::repository::{CatRepository, CatToyRepository};
use crate::domain::types::{
    CAT_EDIT_FORM, CAT_FORM, Cat, CatChanges, CatDetail, CatFilter, NewCat, invalid_toy_choice,
};
use crate::error::CatalogError;

// ── ListCats ─────────────────────────────────────────────────────────────────

pub struct ListCatsUseCase<C: CatRepository> {
    pub cats: C,
}

impl<C: CatRepository> ListCatsUseCase<C> {
    pub async fn execute(&self, filter: CatFilter) -> Result<Vec<Cat>, CatalogError> {
        self.cats.list(filter).await
    }
}

// ── GetCat ───────────────────────────────────────────────────────────────────

pub struct GetCatUseCase<C, T>
where
    C: CatRepository,
    T: CatToyRepository,
{
    pub cats: C,
    pub toys: T,
}

impl<C, T> GetCatUseCase<C, T>
where
    C: CatRepository,
    T: CatToyRepository,
{
    pub async fn execute(&self, id: CatId) -> Result<CatDetail, CatalogError> {
        let cat = self
            .cats
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::CatNotFound)?;
        let toys = self.cats.toys_of(id).await?;
        let attached: Vec<CatToyId> = toys.iter().map(|toy| toy.id).collect();
        let available_toys = self.toys.list_excluding(&attached).await?;
        Ok(CatDetail {
            cat,
            toys,
            available_toys,
        })
    }
}

// ── CreateCat ────────────────────────────────────────────────────────────────

pub struct CreateCatUseCase<C: CatRepository> {
    pub cats: C,
}

impl<C: CatRepository> CreateCatUseCase<C> {
    /// Validate the submitted form and store a cat owned by `owner`.
    pub async fn execute(
        &self,
        owner: UserId,
        input: &[(String, String)],
    ) -> Result<Cat, CatalogError> {
        let mut data = CAT_FORM.clean(input, Mode::Create)?;
        let cat = NewCat {
            owner,
            name: data.take_text("name").unwrap_or_default(),
            breed: data.take_text("breed").unwrap_or_default(),
            description: data.take_text("description").unwrap_or_default(),
            age: data.int("age").unwrap_or_default(),
        };
        let cat = self.cats.create(&cat).await?;
        tracing::info!(cat_id = %cat.id, owner = %owner, "cat created");
        Ok(cat)
    }
}

// ── UpdateCat ────────────────────────────────────────────────────────────────

pub struct UpdateCatUseCase<C, T>
where
    C: CatRepository,
    T: CatToyRepository,
{
    pub cats: C,
    pub toys: T,
}

impl<C, T> UpdateCatUseCase<C, T>
where
    C: CatRepository,
    T: CatToyRepository,
{
    /// Apply the fields present in `input`. A submitted `toys` list replaces the toy set.
    pub async fn execute(&self, id: CatId, input: &[(String, String)]) -> Result<(), CatalogError> {
        if self.cats.find_by_id(id).await?.is_none() {
            return Err(CatalogError::CatNotFound);
        }
        let mut data = CAT_EDIT_FORM.clean(input, Mode::Update)?;

        let toys = match data.ids("toys") {
            Some(ids) => {
                let ids: Vec<CatToyId> = ids.iter().copied().map(CatToyId).collect();
                self.ensure_toys_exist(&ids).await?;
                Some(ids)
            }
            None => None,
        };
        let changes = CatChanges {
            name: data.take_text("name"),
            breed: data.take_text("breed"),
            description: data.take_text("description"),
            age: data.int("age"),
            toys,
        };

        if !self.cats.update(id, &changes).await? {
            return Err(CatalogError::CatNotFound);
        }
        Ok(())
    }

    async fn ensure_toys_exist(&self, ids: &[CatToyId]) -> Result<(), CatalogError> {
        let found = self.toys.find_many(ids).await?;
        let mut errors = FieldErrors::new();
        for id in ids {
            if !found.iter().any(|toy| toy.id == *id) {
                errors.add("toys", invalid_toy_choice(*id));
            }
        }
        Ok(errors.into_result(())?)
    }
}

// ── DeleteCat ────────────────────────────────────────────────────────────────

pub struct DeleteCatUseCase<C: CatRepository> {
    pub cats: C,
}

impl<C: CatRepository> DeleteCatUseCase<C> {
    pub async fn execute(&self, id: CatId) -> Result<(), CatalogError> {
        if !self.cats.delete(id).await? {
            return Err(CatalogError::CatNotFound);
        }
        tracing::info!(cat_id = %id, "cat deleted");
        Ok(())
    }
}

// ── AttachToy / DetachToy ────────────────────────────────────────────────────

pub struct AttachToyUseCase<C: CatRepository> {
    pub cats: C,
}

impl<C: CatRepository> AttachToyUseCase<C> {
    pub async fn execute(&self, cat: CatId, toy: CatToyId) -> Result<(), CatalogError> {
        self.cats.add_toy(cat, toy).await
    }
}

pub struct DetachToyUseCase<C: CatRepository> {
    pub cats: C,
}

impl<C: CatRepository> DetachToyUseCase<C> {
    pub async fn execute(&self, cat: CatId, toy: CatToyId) -> Result<(), CatalogError> {
        self.cats.remove_toy(cat, toy).await
    }
}
