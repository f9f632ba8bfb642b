use catcollector_core::render::Render;

use crate::session::CurrentUser;

// ── GET / ────────────────────────────────────────────────────────────────────

pub async fn home(user: Option<CurrentUser>) -> Render {
    Render::new("index.html").with("user", user.map(|CurrentUser(user)| user))
}

// ── GET /about ───────────────────────────────────────────────────────────────

pub async fn about(user: Option<CurrentUser>) -> Render {
    Render::new("about.html").with("user", user.map(|CurrentUser(user)| user))
}
