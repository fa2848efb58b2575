pub mod domain;
pub mod forms;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Session key holding the identifier of the visitor's stored cart.
pub const CART_SESSION_KEY: &str = "cart_id";
