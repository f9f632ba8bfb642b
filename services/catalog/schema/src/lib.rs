//! SeaORM entities for the catalog service.

pub mod cat_toys;
pub mod cats;
pub mod cats_cat_toys;
pub mod sessions;
pub mod users;
