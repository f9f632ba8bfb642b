use axum::http::StatusCode;
use sea_orm::{EntityTrait, PaginatorTrait};

use catcollector_catalog::domain::repository::CatRepository;
use catcollector_catalog::domain::types::CatChanges;
use catcollector_catalog::error::CatalogError;
use catcollector_catalog::infra::db::DbCatRepository;
use catcollector_catalog_schema::cats;
use catcollector_domain::id::{CatId, CatToyId};

use crate::helpers::{TestApp, json, location, toy_names};

#[tokio::test]
async fn should_answer_health_checks() {
    let app = TestApp::new().await;
    assert_eq!(app.get("/healthz", None).await.status(), StatusCode::OK);
    assert_eq!(app.get("/readyz", None).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn should_render_pages_for_anonymous_visitors() {
    let app = TestApp::new().await;

    let home = json(app.get("/", None).await).await;
    assert_eq!(home["template"], "index.html");
    assert!(home["context"]["user"].is_null());

    let cats = json(app.get("/cats", None).await).await;
    assert_eq!(cats["template"], "cats/index.html");
    assert_eq!(cats["context"]["cats"], serde_json::json!([]));
}

#[tokio::test]
async fn should_redirect_anonymous_delete_and_keep_cat() {
    let app = TestApp::new().await;
    let session = app.signup("timm").await;
    let cat_id = app.create_cat(&session, "Lolo").await;

    let resp = app
        .post_form(&format!("/cats/{cat_id}/delete"), None, "")
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");

    let resp = app.get(&format!("/cats/{cat_id}"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn should_create_cat_owned_by_current_user() {
    let app = TestApp::new().await;
    let session = app.signup("timm").await;
    app.create_cat(&session, "Lolo").await;

    let profile = json(app.get("/user/timm", Some(&session)).await).await;
    assert_eq!(profile["template"], "profile.html");
    assert_eq!(profile["context"]["profile"]["cats"][0]["name"], "Lolo");
    assert_eq!(profile["context"]["is_self"], true);
}

#[tokio::test]
async fn should_rerender_invalid_cat_form_with_422() {
    let app = TestApp::new().await;
    let session = app.signup("timm").await;

    let resp = app
        .post_form("/cats/new", Some(&session), "name=Lolo&breed=Tabby&description=Sleeps&age=-1")
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json(resp).await;
    assert_eq!(body["template"], "cats/form.html");
    let age = body["context"]["form"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .find(|field| field["name"] == "age")
        .unwrap()
        .clone();
    assert_eq!(age["value"], "-1");
    assert_eq!(
        age["errors"][0],
        "Ensure this value is greater than or equal to 0."
    );

    let cats = json(app.get("/cats", None).await).await;
    assert_eq!(cats["context"]["cats"], serde_json::json!([]));
}

#[tokio::test]
async fn should_return_json_404_for_missing_cat() {
    let app = TestApp::new().await;
    let resp = app.get("/cats/999", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = json(resp).await;
    assert_eq!(body["kind"], "CAT_NOT_FOUND");
}

#[tokio::test]
async fn should_move_mouse_between_toy_lists() {
    let app = TestApp::new().await;
    let session = app.signup("timm").await;
    let cat_id = app.create_cat(&session, "Lolo").await;
    let mouse_id = app.create_toy(&session, "Mouse").await;

    let toy = json(app.get(&format!("/cattoys/{mouse_id}"), None).await).await;
    assert_eq!(toy["context"]["cattoy"]["name"], "Mouse");

    let detail = json(app.get(&format!("/cats/{cat_id}"), None).await).await;
    assert_eq!(toy_names(&detail, "available_toys"), ["Mouse"]);
    assert!(toy_names(&detail, "toys").is_empty());

    let resp = app
        .post_form(&format!("/cats/{cat_id}/add_toy/{mouse_id}"), Some(&session), "")
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/cats/{cat_id}"));

    let detail = json(app.get(&format!("/cats/{cat_id}"), None).await).await;
    assert_eq!(toy_names(&detail, "toys"), ["Mouse"]);
    assert!(toy_names(&detail, "available_toys").is_empty());

    // Attaching twice leaves a single membership.
    app.post_form(&format!("/cats/{cat_id}/add_toy/{mouse_id}"), Some(&session), "")
        .await;
    let detail = json(app.get(&format!("/cats/{cat_id}"), None).await).await;
    assert_eq!(toy_names(&detail, "toys"), ["Mouse"]);

    app.post_form(&format!("/cats/{cat_id}/remove_toy/{mouse_id}"), Some(&session), "")
        .await;
    let detail = json(app.get(&format!("/cats/{cat_id}"), None).await).await;
    assert!(toy_names(&detail, "toys").is_empty());
    assert_eq!(toy_names(&detail, "available_toys"), ["Mouse"]);
}

#[tokio::test]
async fn should_replace_toys_through_edit_form() {
    let app = TestApp::new().await;
    let session = app.signup("timm").await;
    let cat_id = app.create_cat(&session, "Lolo").await;
    let mouse_id = app.create_toy(&session, "Mouse").await;
    let yarn_id = app.create_toy(&session, "Yarn").await;

    let form = format!("name=Lola&toys={mouse_id}&toys={yarn_id}");
    let resp = app
        .post_form(&format!("/cats/{cat_id}/edit"), Some(&session), &form)
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let detail = json(app.get(&format!("/cats/{cat_id}"), None).await).await;
    assert_eq!(detail["context"]["cat"]["name"], "Lola");
    assert_eq!(detail["context"]["cat"]["age"], 3);
    assert_eq!(toy_names(&detail, "toys"), ["Mouse", "Yarn"]);

    let form = format!("toys={yarn_id}");
    app.post_form(&format!("/cats/{cat_id}/edit"), Some(&session), &form)
        .await;
    let detail = json(app.get(&format!("/cats/{cat_id}"), None).await).await;
    assert_eq!(toy_names(&detail, "toys"), ["Yarn"]);
}

#[tokio::test]
async fn should_unlink_deleted_toy_from_cats() {
    let app = TestApp::new().await;
    let session = app.signup("timm").await;
    let cat_id = app.create_cat(&session, "Lolo").await;
    let mouse_id = app.create_toy(&session, "Mouse").await;
    app.post_form(&format!("/cats/{cat_id}/add_toy/{mouse_id}"), Some(&session), "")
        .await;

    let resp = app
        .post_form(&format!("/cattoys/{mouse_id}/delete"), Some(&session), "")
        .await;
    assert_eq!(location(&resp), "/cattoys");

    let detail = json(app.get(&format!("/cats/{cat_id}"), None).await).await;
    assert!(toy_names(&detail, "toys").is_empty());
    assert!(toy_names(&detail, "available_toys").is_empty());
}

#[tokio::test]
async fn should_reject_anonymous_cat_create() {
    let app = TestApp::new().await;

    let resp = app
        .post_form("/cats/new", None, "name=Lolo&breed=Tabby&description=Sleeps&age=3")
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
    assert_eq!(cats::Entity::find().count(&app.db).await.unwrap(), 0);
}

#[tokio::test]
async fn should_reject_non_numeric_cat_id() {
    let app = TestApp::new().await;
    let resp = app.get("/cats/lolo", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_report_missing_toy_from_update_transaction() {
    let app = TestApp::new().await;
    let session = app.signup("timm").await;
    let cat_id = app.create_cat(&session, "Lolo").await;
    let mouse_id = app.create_toy(&session, "Mouse").await;
    app.post_form(&format!("/cats/{cat_id}/add_toy/{mouse_id}"), Some(&session), "")
        .await;

    let repo = DbCatRepository { db: app.db.clone() };
    let changes = CatChanges {
        name: Some("Lola".to_owned()),
        toys: Some(vec![CatToyId(mouse_id as i32), CatToyId(999)]),
        ..Default::default()
    };
    let result = repo.update(CatId(cat_id as i32), &changes).await;

    let Err(CatalogError::Invalid(errors)) = result else {
        panic!("expected invalid form, got {result:?}");
    };
    assert_eq!(
        errors.get("toys"),
        ["Select a valid choice. 999 is not one of the available choices."]
    );
    let detail = json(app.get(&format!("/cats/{cat_id}"), None).await).await;
    assert_eq!(detail["context"]["cat"]["name"], "Lolo");
    assert_eq!(toy_names(&detail, "toys"), ["Mouse"]);
}
