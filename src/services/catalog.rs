use serde::{Deserialize, Serialize};

use crate::domain::cart::Cart;
use crate::domain::catalog::{Catalog, CatalogError};
use crate::domain::product::Product;
use crate::repository::ProductReader;
use crate::services::cart::CartTotalsView;
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the product listing page.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// Optional exact category filter.
    pub category: Option<String>,
}

/// Data required to render the product listing.
pub struct IndexPageData {
    /// Product cards in catalog order.
    pub products: Vec<ProductView>,
    /// Distinct categories in order of first appearance.
    pub categories: Vec<String>,
    /// Category filter echoed back to the view when present.
    pub category: Option<String>,
    /// Cart summary used for the badge.
    pub cart: CartTotalsView,
}

/// Data required to render a single product.
pub struct ProductPageData {
    pub product: ProductView,
    pub cart: CartTotalsView,
}

/// Reads every stored product once and builds the in-memory catalog.
pub fn load_catalog<R>(repo: &R) -> ServiceResult<Catalog>
where
    R: ProductReader + ?Sized,
{
    let products = repo.list_products().map_err(ServiceError::from)?;

    Catalog::new(products).map_err(|err| {
        log::error!("Failed to build the catalog: {err}");
        ServiceError::Conflict
    })
}

/// Loads the product listing.
pub fn load_index_page(catalog: &Catalog, cart: &Cart, query: IndexQuery) -> IndexPageData {
    let category = query
        .category
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    let mut categories: Vec<String> = Vec::new();
    for product in catalog.products() {
        if !product.category.is_empty() && !categories.contains(&product.category) {
            categories.push(product.category.clone());
        }
    }

    let products = catalog
        .products()
        .iter()
        .filter(|product| match &category {
            Some(category) => &product.category == category,
            None => true,
        })
        .map(|product| ProductView::from_product(catalog, product))
        .collect();

    IndexPageData {
        products,
        categories,
        category,
        cart: CartTotalsView::from_cart(cart),
    }
}

/// Loads the detail view of a single product.
pub fn load_product_page(
    catalog: &Catalog,
    cart: &Cart,
    product_id: i32,
) -> ServiceResult<ProductPageData> {
    let product = find_product(catalog, product_id)?;

    Ok(ProductPageData {
        product,
        cart: CartTotalsView::from_cart(cart),
    })
}

/// Looks up a product and maps a missing identifier to `ServiceError::NotFound`.
pub fn find_product(catalog: &Catalog, product_id: i32) -> ServiceResult<ProductView> {
    match catalog.lookup(product_id) {
        Ok(product) => Ok(ProductView::from_product(catalog, product)),
        Err(CatalogError::NotFound(_)) => Err(ServiceError::NotFound),
        Err(err) => {
            log::error!("Unexpected catalog error for product {product_id}: {err}");
            Err(ServiceError::Conflict)
        }
    }
}

/// View model of a product shared by the listing, the detail page and the API.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub brand: String,
    pub thumbnail: String,
    pub stock: i32,
    pub rating: f64,
    pub is_discounted: bool,
    /// Base price, two decimals.
    pub price_formatted: String,
    /// Price after discount, two decimals.
    pub discounted_price_formatted: String,
    /// Discount without trailing zeros, e.g. `"12.5"`.
    pub discount_formatted: String,
}

impl ProductView {
    fn from_product(catalog: &Catalog, product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            brand: product.brand.clone(),
            thumbnail: product.thumbnail.clone(),
            stock: product.stock,
            rating: product.rating,
            is_discounted: product.is_discounted(),
            price_formatted: product.price.format(),
            discounted_price_formatted: catalog.discounted_price(product).format(),
            discount_formatted: product.discount_percentage.format(),
        }
    }
}
