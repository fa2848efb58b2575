use std::collections::HashMap;

use thiserror::Error;

use crate::domain::money::Money;
use crate::domain::product::Product;

/// Errors raised while building or querying a [`Catalog`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No product with the requested identifier exists.
    #[error("product {0} not found")]
    NotFound(i32),
    /// The source data contains the same identifier twice.
    #[error("product {0} appears more than once in the catalog")]
    DuplicateProduct(i32),
}

/// Read-only set of products available for sale.
///
/// The catalog is built once from the product store and never mutated
/// afterwards. Products keep the order of the source data, which is the
/// order used by the listing page.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<i32, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting data that reuses a product identifier.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
        }
        Ok(Self { products, index })
    }

    /// Find the product with the given identifier.
    pub fn lookup(&self, id: i32) -> Result<&Product, CatalogError> {
        self.index
            .get(&id)
            .map(|&position| &self.products[position])
            .ok_or(CatalogError::NotFound(id))
    }

    /// Exact unit price of `product` after its discount.
    pub fn discounted_price(&self, product: &Product) -> Money {
        product.discounted_price()
    }

    /// All products in source order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
