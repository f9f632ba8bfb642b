use catcollector_domain::form::Mode;
use catcollector_domain::id::CatToyId;

use crate::domain::repository::CatToyRepository;
use crate::domain::types::{CAT_TOY_FORM, CatToy, CatToyChanges, NewCatToy};
use crate::error::CatalogError;

// ── ListCatToys ──────────────────────────────────────────────────────────────

pub struct ListCatToysUseCase<T: CatToyRepository> {
    pub toys: T,
}

impl<T: CatToyRepository> ListCatToysUseCase<T> {
    pub async fn execute(&self) -> Result<Vec<CatToy>, CatalogError> {
        self.toys.list().await
    }
}

// ── GetCatToy ────────────────────────────────────────────────────────────────

pub struct GetCatToyUseCase<T: CatToyRepository> {
    pub toys: T,
}

impl<T: CatToyRepository> GetCatToyUseCase<T> {
    pub async fn execute(&self, id: CatToyId) -> Result<CatToy, CatalogError> {
        self.toys
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::CatToyNotFound)
    }
}

// ── CreateCatToy ─────────────────────────────────────────────────────────────

pub struct CreateCatToyUseCase<T: CatToyRepository> {
    pub toys: T,
}

impl<T: CatToyRepository> CreateCatToyUseCase<T> {
    pub async fn execute(&self, input: &[(String, String)]) -> Result<CatToy, CatalogError> {
        let mut data = CAT_TOY_FORM.clean(input, Mode::Create)?;
        let toy = NewCatToy {
            name: data.take_text("name").unwrap_or_default(),
            color: data.take_text("color").unwrap_or_default(),
        };
        let toy = self.toys.create(&toy).await?;
        tracing::info!(cat_toy_id = %toy.id, "cat toy created");
        Ok(toy)
    }
}

// ── UpdateCatToy ─────────────────────────────────────────────────────────────

pub struct UpdateCatToyUseCase<T: CatToyRepository> {
    pub toys: T,
}

impl<T: CatToyRepository> UpdateCatToyUseCase<T> {
    pub async fn execute(
        &self,
        id: CatToyId,
        input: &[(String, String)],
    ) -> Result<(), CatalogError> {
        if self.toys.find_by_id(id).await?.is_none() {
            return Err(CatalogError::CatToyNotFound);
        }
        let mut data = CAT_TOY_FORM.clean(input, Mode::Update)?;
        let changes = CatToyChanges {
            name: data.take_text("name"),
            color: data.take_text("color"),
        };
        if !self.toys.update(id, &changes).await? {
            return Err(CatalogError::CatToyNotFound);
        }
        Ok(())
    }
}

// ── DeleteCatToy ─────────────────────────────────────────────────────────────

pub struct DeleteCatToyUseCase<T: CatToyRepository> {
    pub toys: T,
}

impl<T: CatToyRepository> DeleteCatToyUseCase<T> {
    pub async fn execute(&self, id: CatToyId) -> Result<(), CatalogError> {
        if !self.toys.delete(id).await? {
            return Err(CatalogError::CatToyNotFound);
        }
        tracing::info!(cat_toy_id = %id, "cat toy deleted");
        Ok(())
    }
}
