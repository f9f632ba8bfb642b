mod cat_toy_test;
mod helpers;
