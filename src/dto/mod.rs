pub mod auth;
pub mod cart;
pub mod categories;
pub mod homepage;
pub mod menus;
pub mod orders;
pub mod product_models;
pub mod products;
pub mod store;
pub mod style;
pub mod users;
