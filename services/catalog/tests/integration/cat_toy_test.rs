use catcollector_catalog::error::CatalogError;
use catcollector_catalog::usecase::cat::{AttachToyUseCase, DetachToyUseCase, GetCatUseCase};
use catcollector_catalog::usecase::cat_toy::{
    CreateCatToyUseCase, DeleteCatToyUseCase, GetCatToyUseCase, ListCatToysUseCase,
    UpdateCatToyUseCase,
};
use catcollector_domain::id::{CatToyId, UserId};

use crate::helpers::{MemoryStore, pairs};

#[tokio::test]
async fn should_show_mouse_on_detail_then_track_it_through_attach_and_detach() {
    let store = MemoryStore::new();
    let lolo = store.seed_cat(UserId(1), "Lolo");

    let mouse = CreateCatToyUseCase {
        toys: store.clone(),
    }
    .execute(&pairs(&[("name", "Mouse"), ("color", "gray")]))
    .await
    .unwrap();

    let shown = GetCatToyUseCase {
        toys: store.clone(),
    }
    .execute(mouse.id)
    .await
    .unwrap();
    assert_eq!(shown.name, "Mouse");
    assert_eq!(shown.color, "gray");

    let detail_uc = GetCatUseCase {
        cats: store.clone(),
        toys: store.clone(),
    };
    AttachToyUseCase {
        cats: store.clone(),
    }
    .execute(lolo.id, mouse.id)
    .await
    .unwrap();
    let detail = detail_uc.execute(lolo.id).await.unwrap();
    assert!(detail.toys.iter().any(|t| t.name == "Mouse"));
    assert!(!detail.available_toys.iter().any(|t| t.name == "Mouse"));

    DetachToyUseCase {
        cats: store.clone(),
    }
    .execute(lolo.id, mouse.id)
    .await
    .unwrap();
    let detail = detail_uc.execute(lolo.id).await.unwrap();
    assert!(!detail.toys.iter().any(|t| t.name == "Mouse"));
    assert!(detail.available_toys.iter().any(|t| t.name == "Mouse"));
}

#[tokio::test]
async fn should_list_toys_by_id() {
    let store = MemoryStore::new();
    store.seed_toy("Mouse", "gray");
    store.seed_toy("Yarn", "red");

    let toys = ListCatToysUseCase {
        toys: store.clone(),
    }
    .execute()
    .await
    .unwrap();
    let names: Vec<&str> = toys.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Mouse", "Yarn"]);
}

#[tokio::test]
async fn should_update_only_submitted_toy_fields() {
    let store = MemoryStore::new();
    let mouse = store.seed_toy("Mouse", "gray");

    UpdateCatToyUseCase {
        toys: store.clone(),
    }
    .execute(mouse.id, &pairs(&[("color", "white")]))
    .await
    .unwrap();

    let updated = GetCatToyUseCase {
        toys: store.clone(),
    }
    .execute(mouse.id)
    .await
    .unwrap();
    assert_eq!(updated.name, "Mouse");
    assert_eq!(updated.color, "white");
}

#[tokio::test]
async fn should_require_every_toy_field_on_create() {
    let store = MemoryStore::new();
    let result = CreateCatToyUseCase {
        toys: store.clone(),
    }
    .execute(&pairs(&[("name", "Mouse")]))
    .await;

    let Err(CatalogError::Invalid(errors)) = result else {
        panic!("expected invalid form, got {result:?}");
    };
    assert_eq!(errors.get("color"), ["This field is required."]);
}

#[tokio::test]
async fn should_delete_toy_and_unlink_it_from_cats() {
    let store = MemoryStore::new();
    let mouse = store.seed_toy("Mouse", "gray");
    let yarn = store.seed_toy("Yarn", "red");
    let lolo = store.seed_cat(UserId(1), "Lolo");
    store.link(lolo.id, mouse.id);
    store.link(lolo.id, yarn.id);

    DeleteCatToyUseCase {
        toys: store.clone(),
    }
    .execute(mouse.id)
    .await
    .unwrap();

    assert_eq!(store.toy_ids_of(lolo.id), [yarn.id]);
    assert!(store.cat(lolo.id).is_some(), "cats survive toy deletion");

    let result = GetCatToyUseCase {
        toys: store.clone(),
    }
    .execute(mouse.id)
    .await;
    assert!(matches!(result, Err(CatalogError::CatToyNotFound)));
}

#[tokio::test]
async fn should_return_not_found_when_deleting_missing_toy() {
    let store = MemoryStore::new();
    let result = DeleteCatToyUseCase {
        toys: store.clone(),
    }
    .execute(CatToyId(5))
    .await;
    assert!(matches!(result, Err(CatalogError::CatToyNotFound)));
}
