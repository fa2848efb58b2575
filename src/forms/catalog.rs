use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::money::Percentage;
use crate::domain::product::NewProduct;

/// Maximum length allowed for a product title.
const TITLE_MAX_LEN: u64 = 256;
/// Highest accepted base price. Its discounted unit price still fits the cart tables.
const PRICE_MAX: f64 = 1_000_000_000.0;

/// Result type returned by the catalog import helpers.
pub type CatalogUploadResult<T> = Result<T, CatalogUploadError>;

/// Errors that can occur while reading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogUploadError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A product record failed validation. `row` is 1-based.
    #[error("product #{row} is invalid: {source}")]
    InvalidProduct {
        row: usize,
        #[source]
        source: ValidationErrors,
    },
    /// The title is empty once control characters and padding are removed.
    #[error("product #{row} has an empty title")]
    EmptyTitle { row: usize },
    #[error("catalog file contains no products")]
    EmptyUpload,
    #[error("product #{row} reuses id {id}")]
    DuplicateId { row: usize, id: i32 },
}

/// Catalog file in the `{"products": [...]}` layout used by the storefront data.
#[derive(Debug, Deserialize)]
pub struct CatalogUpload {
    pub products: Vec<ProductRecord>,
}

/// One product as written in the catalog file. Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Identifier used by the source data; kept as the stored product id.
    #[validate(range(min = 1))]
    pub id: i32,
    #[validate(length(min = 1, max = TITLE_MAX_LEN))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: String,
    /// Base price as a decimal amount.
    #[validate(range(min = 0.0, max = PRICE_MAX))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub discount_percentage: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock: i32,
    #[serde(default)]
    pub thumbnail: String,
}

impl CatalogUpload {
    /// Parse a catalog from any JSON source.
    pub fn from_reader(reader: impl Read) -> CatalogUploadResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parse the catalog file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> CatalogUploadResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Validates every record and converts it into an insertable product.
    pub fn into_new_products(self) -> CatalogUploadResult<Vec<NewProduct>> {
        if self.products.is_empty() {
            return Err(CatalogUploadError::EmptyUpload);
        }

        let mut seen = HashSet::with_capacity(self.products.len());
        for (index, record) in self.products.iter().enumerate() {
            if !seen.insert(record.id) {
                return Err(CatalogUploadError::DuplicateId {
                    row: index + 1,
                    id: record.id,
                });
            }
        }

        self.products
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.into_new_product(index + 1))
            .collect()
    }
}

impl ProductRecord {
    fn into_new_product(self, row: usize) -> CatalogUploadResult<NewProduct> {
        self.validate()
            .map_err(|source| CatalogUploadError::InvalidProduct { row, source })?;

        let title = sanitize_plain_text(&self.title);
        if title.is_empty() {
            return Err(CatalogUploadError::EmptyTitle { row });
        }

        let price_cents = (self.price * 100.0).round() as i64;
        let discount =
            Percentage::saturating_from_basis_points((self.discount_percentage * 100.0).round() as i32);

        Ok(NewProduct::new(title, price_cents)
            .with_id(self.id)
            .with_description(self.description.trim())
            .with_labels(
                sanitize_plain_text(&self.category),
                sanitize_plain_text(&self.brand),
            )
            .with_discount(discount)
            .with_stock_and_rating(self.stock, self.rating)
            .with_thumbnail(self.thumbnail.trim()))
    }
}

fn sanitize_plain_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}
