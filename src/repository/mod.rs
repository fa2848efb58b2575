use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::cart::Cart;
use crate::domain::product::{NewProduct, Product};

pub mod cart;
pub mod product;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over the product store.
pub trait ProductReader {
    /// All products ordered by identifier.
    fn list_products(&self) -> RepositoryResult<Vec<Product>>;
}

/// Write operations over the product store.
pub trait ProductWriter {
    /// Insert products, replacing stored rows that share a source identifier.
    ///
    /// Returns the number of rows written.
    fn upsert_products(&self, new_products: &[NewProduct]) -> RepositoryResult<usize>;
}

/// Read-only operations over stored carts.
pub trait CartReader {
    /// Cart with the given identifier, `None` when it does not exist.
    fn get_cart(&self, cart_id: i32) -> RepositoryResult<Option<Cart>>;
}

/// Write operations over stored carts.
pub trait CartWriter {
    /// Create an empty cart and return its identifier.
    fn create_cart(&self) -> RepositoryResult<i32>;
    /// Replace the stored lines of `cart_id` with the lines of `cart`.
    fn save_cart(&self, cart_id: i32, cart: &Cart) -> RepositoryResult<()>;
}
