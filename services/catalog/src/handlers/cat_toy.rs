use axum::Form;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};

use catcollector_core::render::Render;
use catcollector_domain::form::{FieldErrors, Mode};
use catcollector_domain::id::CatToyId;

use crate::domain::types::{CAT_TOY_FORM, CatToy};
use crate::error::CatalogError;
use crate::handlers::{FormPairs, form_page};
use crate::session::CurrentUser;
use crate::state::AppState;
use crate::usecase::cat_toy::{
    CreateCatToyUseCase, DeleteCatToyUseCase, GetCatToyUseCase, ListCatToysUseCase,
    UpdateCatToyUseCase,
};

fn cat_toy_path(id: CatToyId) -> String {
    format!("/cattoys/{id}")
}

async fn load_toy(state: &AppState, id: CatToyId) -> Result<CatToy, CatalogError> {
    let usecase = GetCatToyUseCase {
        toys: state.cat_toy_repo(),
    };
    usecase.execute(id).await
}

fn edit_page(toy: &CatToy, values: &[(String, String)], errors: &FieldErrors) -> Render {
    form_page("cattoys/form.html", &CAT_TOY_FORM, values, errors, Mode::Update).with("cattoy", toy)
}

// ── GET /cattoys ─────────────────────────────────────────────────────────────

pub async fn list_cat_toys(State(state): State<AppState>) -> Result<Render, CatalogError> {
    let usecase = ListCatToysUseCase {
        toys: state.cat_toy_repo(),
    };
    let toys = usecase.execute().await?;
    Ok(Render::new("cattoys/index.html").with("cattoys", toys))
}

// ── GET /cattoys/{id} ────────────────────────────────────────────────────────

pub async fn show_cat_toy(
    State(state): State<AppState>,
    Path(id): Path<CatToyId>,
) -> Result<Render, CatalogError> {
    let toy = load_toy(&state, id).await?;
    Ok(Render::new("cattoys/detail.html").with("cattoy", toy))
}

// ── GET/POST /cattoys/new ────────────────────────────────────────────────────

pub async fn new_cat_toy_form(_user: CurrentUser) -> Render {
    form_page("cattoys/form.html", &CAT_TOY_FORM, &[], &FieldErrors::new(), Mode::Create)
}

pub async fn create_cat_toy(
    _user: CurrentUser,
    State(state): State<AppState>,
    Form(input): FormPairs,
) -> Result<Response, CatalogError> {
    let usecase = CreateCatToyUseCase {
        toys: state.cat_toy_repo(),
    };
    match usecase.execute(&input).await {
        Ok(toy) => Ok(Redirect::to(&cat_toy_path(toy.id)).into_response()),
        Err(CatalogError::Invalid(errors)) => Ok(form_page(
            "cattoys/form.html",
            &CAT_TOY_FORM,
            &input,
            &errors,
            Mode::Create,
        )
        .into_response()),
        Err(e) => Err(e),
    }
}

// ── GET/POST /cattoys/{id}/edit ──────────────────────────────────────────────

pub async fn edit_cat_toy_form(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<CatToyId>,
) -> Result<Render, CatalogError> {
    let toy = load_toy(&state, id).await?;
    let values = vec![
        ("name".to_owned(), toy.name.clone()),
        ("color".to_owned(), toy.color.clone()),
    ];
    Ok(edit_page(&toy, &values, &FieldErrors::new()))
}

pub async fn update_cat_toy(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<CatToyId>,
    Form(input): FormPairs,
) -> Result<Response, CatalogError> {
    let usecase = UpdateCatToyUseCase {
        toys: state.cat_toy_repo(),
    };
    match usecase.execute(id, &input).await {
        Ok(()) => Ok(Redirect::to(&cat_toy_path(id)).into_response()),
        Err(CatalogError::Invalid(errors)) => {
            let toy = load_toy(&state, id).await?;
            Ok(edit_page(&toy, &input, &errors).into_response())
        }
        Err(e) => Err(e),
    }
}

// ── GET/POST /cattoys/{id}/delete ────────────────────────────────────────────

pub async fn confirm_delete_cat_toy(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<CatToyId>,
) -> Result<Render, CatalogError> {
    let toy = load_toy(&state, id).await?;
    Ok(Render::new("cattoys/confirm_delete.html").with("cattoy", toy))
}

pub async fn delete_cat_toy(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<CatToyId>,
) -> Result<Redirect, CatalogError> {
    let usecase = DeleteCatToyUseCase {
        toys: state.cat_toy_repo(),
    };
    usecase.execute(id).await?;
    Ok(Redirect::to("/cattoys"))
}
