use std::num::TryFromIntError;

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::cart::CartLineItem;
use crate::domain::money::Money;

#[derive(Insertable)]
#[diesel(table_name = crate::schema::carts)]
pub struct NewCart {
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::cart_items)]
pub struct CartItem {
    pub id: i32,
    pub cart_id: i32,
    pub product_id: i32,
    pub title: String,
    pub unit_price_units: i64,
    pub quantity: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::cart_items)]
pub struct NewCartItem<'a> {
    pub cart_id: i32,
    pub product_id: i32,
    pub title: &'a str,
    pub unit_price_units: i64,
    pub quantity: i64,
}

impl<'a> NewCartItem<'a> {
    /// Row for `item` in cart `cart_id`. Fails when the unit price does not fit the column.
    pub fn from_domain(cart_id: i32, item: &'a CartLineItem) -> Result<Self, TryFromIntError> {
        Ok(Self {
            cart_id,
            product_id: item.product_id,
            title: item.title.as_str(),
            unit_price_units: item.unit_price.to_stored_units()?,
            quantity: i64::from(item.quantity),
        })
    }
}

impl From<CartItem> for CartLineItem {
    fn from(value: CartItem) -> Self {
        Self {
            product_id: value.product_id,
            title: value.title,
            unit_price: Money::from_units(value.unit_price_units.max(0)),
            quantity: u32::try_from(value.quantity.max(1)).unwrap_or(u32::MAX),
        }
    }
}
