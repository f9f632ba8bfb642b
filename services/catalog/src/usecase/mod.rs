pub mod account;
pub mod cat;
pub mod cat_toy;
pub mod password;
