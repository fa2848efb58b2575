pub mod cart;
pub mod config;
pub mod product;
