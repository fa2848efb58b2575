use serde::{Deserialize, Serialize};

use crate::domain::money::{Money, Percentage};

/// Domain representation of a product offered by the storefront.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the product.
    pub title: String,
    /// Longer description shown on the product page.
    pub description: String,
    /// Category label used for display.
    pub category: String,
    /// Brand label used for display.
    pub brand: String,
    /// Base unit price before any discount.
    pub price: Money,
    /// Discount applied to the base price, `0` when the product is not discounted.
    pub discount_percentage: Percentage,
    /// Units in stock. Informational only, the cart never reserves stock.
    pub stock: i32,
    /// Average customer rating in the `[0, 5]` range.
    pub rating: f64,
    /// Reference to the product image.
    pub thumbnail: String,
}

impl Product {
    /// Unit price after applying the product discount.
    pub fn discounted_price(&self) -> Money {
        self.price.discounted(self.discount_percentage)
    }

    /// Whether a discount applies to the product.
    pub fn is_discounted(&self) -> bool {
        !self.discount_percentage.is_zero()
    }
}

/// Payload required to insert a new product into the catalog store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Identifier supplied by the catalog source, `None` to let the store assign one.
    pub id: Option<i32>,
    pub title: String,
    pub description: String,
    pub category: String,
    pub brand: String,
    /// Base price in cents.
    pub price_cents: i64,
    pub discount_percentage: Percentage,
    pub stock: i32,
    pub rating: f64,
    pub thumbnail: String,
}

impl NewProduct {
    /// Build a new product payload with the supplied title and price and empty display fields.
    pub fn new(title: impl Into<String>, price_cents: i64) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: String::new(),
            category: String::new(),
            brand: String::new(),
            price_cents,
            discount_percentage: Percentage::ZERO,
            stock: 0,
            rating: 0.0,
            thumbnail: String::new(),
        }
    }

    /// Keep the identifier the catalog source uses for this product.
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    /// Attach a descriptive text to the product payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach category and brand labels to the product payload.
    pub fn with_labels(mut self, category: impl Into<String>, brand: impl Into<String>) -> Self {
        self.category = category.into();
        self.brand = brand.into();
        self
    }

    /// Apply a discount to the product payload.
    pub fn with_discount(mut self, discount: Percentage) -> Self {
        self.discount_percentage = discount;
        self
    }

    /// Set the informational stock and rating values.
    pub fn with_stock_and_rating(mut self, stock: i32, rating: f64) -> Self {
        self.stock = stock;
        self.rating = rating;
        self
    }

    /// Attach an image reference to the product payload.
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }
}
