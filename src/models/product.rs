use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::money::{Money, Percentage};
use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub brand: String,
    pub price_cents: i64,
    pub discount_basis_points: i32,
    pub stock: i32,
    pub rating: f64,
    pub thumbnail: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub id: Option<i32>,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub brand: &'a str,
    pub price_cents: i64,
    pub discount_basis_points: i32,
    pub stock: i32,
    pub rating: f64,
    pub thumbnail: &'a str,
}

/// Columns rewritten when an imported product replaces a stored one.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct ProductChangeset<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub brand: &'a str,
    pub price_cents: i64,
    pub discount_basis_points: i32,
    pub stock: i32,
    pub rating: f64,
    pub thumbnail: &'a str,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            category: value.category,
            brand: value.brand,
            price: Money::from_cents(value.price_cents.max(0)),
            discount_percentage: Percentage::saturating_from_basis_points(
                value.discount_basis_points,
            ),
            stock: value.stock.max(0),
            rating: value.rating.clamp(0.0, 5.0),
            thumbnail: value.thumbnail,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            id: value.id,
            title: value.title.as_str(),
            description: value.description.as_str(),
            category: value.category.as_str(),
            brand: value.brand.as_str(),
            price_cents: value.price_cents,
            discount_basis_points: i32::from(value.discount_percentage.basis_points()),
            stock: value.stock,
            rating: value.rating,
            thumbnail: value.thumbnail.as_str(),
        }
    }
}

impl<'a> ProductChangeset<'a> {
    pub fn from_domain(value: &'a DomainNewProduct, updated_at: NaiveDateTime) -> Self {
        Self {
            title: value.title.as_str(),
            description: value.description.as_str(),
            category: value.category.as_str(),
            brand: value.brand.as_str(),
            price_cents: value.price_cents,
            discount_basis_points: i32::from(value.discount_percentage.basis_points()),
            stock: value.stock,
            rating: value.rating,
            thumbnail: value.thumbnail.as_str(),
            updated_at,
        }
    }
}
