use axum::{
    Router,
    routing::{get, post},
};

use catcollector_core::health::{healthz, readyz};
use catcollector_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    account::{delete_account, login, login_form, logout, profile, signup, signup_form},
    cat::{
        add_toy, confirm_delete_cat, create_cat, delete_cat, edit_cat_form, list_cats,
        new_cat_form, remove_toy, show_cat, update_cat,
    },
    cat_toy::{
        confirm_delete_cat_toy, create_cat_toy, delete_cat_toy, edit_cat_toy_form,
        list_cat_toys, new_cat_toy_form, show_cat_toy, update_cat_toy,
    },
    pages::{about, home},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Pages
        .route("/", get(home))
        .route("/about", get(about))
        // Cats
        .route("/cats", get(list_cats))
        .route("/cats/new", get(new_cat_form).post(create_cat))
        .route("/cats/{id}", get(show_cat))
        .route("/cats/{id}/edit", get(edit_cat_form).post(update_cat))
        .route("/cats/{id}/delete", get(confirm_delete_cat).post(delete_cat))
        .route("/cats/{cat_id}/add_toy/{toy_id}", get(add_toy).post(add_toy))
        .route(
            "/cats/{cat_id}/remove_toy/{toy_id}",
            get(remove_toy).post(remove_toy),
        )
        // Cat toys
        .route("/cattoys", get(list_cat_toys))
        .route("/cattoys/new", get(new_cat_toy_form).post(create_cat_toy))
        .route("/cattoys/{id}", get(show_cat_toy))
        .route("/cattoys/{id}/edit", get(edit_cat_toy_form).post(update_cat_toy))
        .route(
            "/cattoys/{id}/delete",
            get(confirm_delete_cat_toy).post(delete_cat_toy),
        )
        // Accounts
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout).post(logout))
        .route("/signup", get(signup_form).post(signup))
        .route("/user/{username}", get(profile))
        .route("/user/{username}/delete", post(delete_account))
        .layer(trace_layer())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
