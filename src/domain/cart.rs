use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::catalog::Catalog;
use crate::domain::money::Money;

/// Errors raised by cart commands.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The product is not part of the catalog.
    #[error("product {0} is not in the catalog")]
    UnknownProduct(i32),
}

/// One product's aggregated quantity inside a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Identifier of the catalog product this line refers to.
    pub product_id: i32,
    /// Product title captured when the line was created.
    pub title: String,
    /// Discounted unit price captured when the line was created.
    ///
    /// Later catalog changes never reprice a line that is already in the cart.
    pub unit_price: Money,
    /// Number of units, always at least one.
    pub quantity: u32,
}

impl CartLineItem {
    /// `unit_price * quantity`.
    pub fn subtotal(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// Aggregates derived from the current cart contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    /// Sum of all quantities, shown on the cart badge.
    pub item_count: u64,
    /// Sum of all line subtotals.
    pub grand_total: Money,
}

/// Shopping cart owned by a single session.
///
/// Holds at most one line per product, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from stored lines, keeping the first line per product.
    pub fn from_line_items(items: impl IntoIterator<Item = CartLineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if cart.position(item.product_id).is_none() {
                cart.items.push(item);
            }
        }
        cart
    }

    /// Add one unit of `product_id`.
    ///
    /// A product already in the cart gets its quantity incremented and keeps
    /// its original unit price. Otherwise a new line is appended at the
    /// discounted price the catalog reports now. An unknown product leaves the
    /// cart untouched.
    pub fn add(&mut self, catalog: &Catalog, product_id: i32) -> Result<&CartLineItem, CartError> {
        let product = catalog
            .lookup(product_id)
            .map_err(|_| CartError::UnknownProduct(product_id))?;

        let position = match self.position(product_id) {
            Some(position) => {
                let item = &mut self.items[position];
                item.quantity = item.quantity.saturating_add(1);
                position
            }
            None => {
                self.items.push(CartLineItem {
                    product_id,
                    title: product.title.clone(),
                    unit_price: catalog.discounted_price(product),
                    quantity: 1,
                });
                self.items.len() - 1
            }
        };

        Ok(&self.items[position])
    }

    /// Remove the whole line for `product_id`, whatever its quantity.
    ///
    /// Removing a product that is not in the cart is a no-op.
    pub fn remove(&mut self, product_id: i32) -> Option<CartLineItem> {
        self.position(product_id)
            .map(|position| self.items.remove(position))
    }

    /// Line items in insertion order.
    pub fn line_items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Recompute badge count and grand total from the current lines.
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            item_count: self.items.iter().map(|item| u64::from(item.quantity)).sum(),
            grand_total: self.items.iter().map(CartLineItem::subtotal).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, product_id: i32) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product_id == product_id)
    }
}
