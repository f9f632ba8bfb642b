use axum::Form;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};

use catcollector_core::render::Render;
use catcollector_domain::form::{FieldErrors, Mode};
use catcollector_domain::id::{CatId, CatToyId};

use crate::domain::types::{CAT_EDIT_FORM, CAT_FORM, CatDetail, CatFilter, CatToy};
use crate::error::CatalogError;
use crate::handlers::{FormPairs, form_page};
use crate::session::CurrentUser;
use crate::state::AppState;
use crate::usecase::cat::{
    AttachToyUseCase, CreateCatUseCase, DeleteCatUseCase, DetachToyUseCase, GetCatUseCase,
    ListCatsUseCase, UpdateCatUseCase,
};

fn cat_path(id: CatId) -> String {
    format!("/cats/{id}")
}

async fn load_detail(state: &AppState, id: CatId) -> Result<CatDetail, CatalogError> {
    let usecase = GetCatUseCase {
        cats: state.cat_repo(),
        toys: state.cat_toy_repo(),
    };
    usecase.execute(id).await
}

/// Current field values of a cat, as an edit form would submit them.
fn detail_values(detail: &CatDetail) -> Vec<(String, String)> {
    let cat = &detail.cat;
    let mut values = vec![
        ("name".to_owned(), cat.name.clone()),
        ("breed".to_owned(), cat.breed.clone()),
        ("description".to_owned(), cat.description.clone()),
        ("age".to_owned(), cat.age.to_string()),
    ];
    values.extend(
        detail
            .toys
            .iter()
            .map(|toy| ("toys".to_owned(), toy.id.to_string())),
    );
    values
}

/// Every toy a cat could hold, ordered by id.
fn toy_choices(detail: &CatDetail) -> Vec<CatToy> {
    let mut choices: Vec<CatToy> = detail
        .toys
        .iter()
        .chain(&detail.available_toys)
        .cloned()
        .collect();
    choices.sort_by_key(|toy| toy.id);
    choices
}

fn edit_page(detail: &CatDetail, values: &[(String, String)], errors: &FieldErrors) -> Render {
    form_page("cats/form.html", &CAT_EDIT_FORM, values, errors, Mode::Update)
        .with("cat", &detail.cat)
        .with("choices", toy_choices(detail))
}

// ── GET /cats ────────────────────────────────────────────────────────────────

pub async fn list_cats(State(state): State<AppState>) -> Result<Render, CatalogError> {
    let usecase = ListCatsUseCase {
        cats: state.cat_repo(),
    };
    let cats = usecase.execute(CatFilter::default()).await?;
    Ok(Render::new("cats/index.html").with("cats", cats))
}

// ── GET /cats/{id} ───────────────────────────────────────────────────────────

pub async fn show_cat(
    State(state): State<AppState>,
    Path(id): Path<CatId>,
) -> Result<Render, CatalogError> {
    let detail = load_detail(&state, id).await?;
    Ok(Render::new("cats/show.html")
        .with("cat", &detail.cat)
        .with("toys", &detail.toys)
        .with("available_toys", &detail.available_toys))
}

// ── GET/POST /cats/new ───────────────────────────────────────────────────────

pub async fn new_cat_form(_user: CurrentUser) -> Render {
    form_page("cats/form.html", &CAT_FORM, &[], &FieldErrors::new(), Mode::Create)
}

pub async fn create_cat(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Form(input): FormPairs,
) -> Result<Response, CatalogError> {
    let usecase = CreateCatUseCase {
        cats: state.cat_repo(),
    };
    match usecase.execute(user.id, &input).await {
        Ok(_) => Ok(Redirect::to("/cats").into_response()),
        Err(CatalogError::Invalid(errors)) => {
            Ok(form_page("cats/form.html", &CAT_FORM, &input, &errors, Mode::Create).into_response())
        }
        Err(e) => Err(e),
    }
}

// ── GET/POST /cats/{id}/edit ─────────────────────────────────────────────────

pub async fn edit_cat_form(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<CatId>,
) -> Result<Render, CatalogError> {
    let detail = load_detail(&state, id).await?;
    Ok(edit_page(&detail, &detail_values(&detail), &FieldErrors::new()))
}

pub async fn update_cat(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<CatId>,
    Form(input): FormPairs,
) -> Result<Response, CatalogError> {
    let usecase = UpdateCatUseCase {
        cats: state.cat_repo(),
        toys: state.cat_toy_repo(),
    };
    match usecase.execute(id, &input).await {
        Ok(()) => Ok(Redirect::to(&cat_path(id)).into_response()),
        Err(CatalogError::Invalid(errors)) => {
            let detail = load_detail(&state, id).await?;
            Ok(edit_page(&detail, &input, &errors).into_response())
        }
        Err(e) => Err(e),
    }
}

// ── GET/POST /cats/{id}/delete ───────────────────────────────────────────────

pub async fn confirm_delete_cat(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<CatId>,
) -> Result<Render, CatalogError> {
    let detail = load_detail(&state, id).await?;
    Ok(Render::new("cats/confirm_delete.html").with("cat", &detail.cat))
}

pub async fn delete_cat(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<CatId>,
) -> Result<Redirect, CatalogError> {
    let usecase = DeleteCatUseCase {
        cats: state.cat_repo(),
    };
    usecase.execute(id).await?;
    Ok(Redirect::to("/cats"))
}

// ── /cats/{cat_id}/add_toy/{toy_id} ──────────────────────────────────────────

pub async fn add_toy(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path((cat_id, toy_id)): Path<(CatId, CatToyId)>,
) -> Result<Redirect, CatalogError> {
    let usecase = AttachToyUseCase {
        cats: state.cat_repo(),
    };
    usecase.execute(cat_id, toy_id).await?;
    Ok(Redirect::to(&cat_path(cat_id)))
}

// ── /cats/{cat_id}/remove_toy/{toy_id} ───────────────────────────────────────

pub async fn remove_toy(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path((cat_id, toy_id)): Path<(CatId, CatToyId)>,
) -> Result<Redirect, CatalogError> {
    let usecase = DetachToyUseCase {
        cats: state.cat_repo(),
    };
    usecase.execute(cat_id, toy_id).await?;
    Ok(Redirect::to(&cat_path(cat_id)))
}
