use serde::Serialize;

use crate::domain::cart::{Cart, CartError, CartLineItem};
use crate::domain::catalog::Catalog;
use crate::repository::{CartReader, CartWriter};
use crate::services::{ServiceError, ServiceResult};

/// Cart of one visitor together with the identifier it is stored under.
///
/// `id` is `None` until the first successful command creates the stored cart.
#[derive(Debug, Default)]
pub struct SessionCart {
    pub id: Option<i32>,
    pub cart: Cart,
}

/// Result of a successful add-to-cart command.
#[derive(Debug, Serialize)]
pub struct AddToCartOutcome {
    /// Line item after the command, including the new quantity.
    pub line_item: CartLineItemView,
    /// Cart summary after the command.
    pub cart: CartTotalsView,
    /// Confirmation text shown to the customer.
    pub message: String,
}

/// Result of a remove-from-cart command.
#[derive(Debug, Serialize)]
pub struct RemoveFromCartOutcome {
    /// Removed line, `None` when the product was not in the cart.
    pub removed: Option<CartLineItemView>,
    pub cart: CartTotalsView,
}

/// Data required to render the cart.
#[derive(Debug, Serialize)]
pub struct CartPageData {
    pub items: Vec<CartLineItemView>,
    pub cart: CartTotalsView,
}

/// Loads the cart referenced by the session, or an empty unsaved cart.
///
/// A reference to a cart that no longer exists yields a fresh cart.
pub fn load_session_cart<R>(repo: &R, cart_id: Option<i32>) -> ServiceResult<SessionCart>
where
    R: CartReader + ?Sized,
{
    let Some(id) = cart_id else {
        return Ok(SessionCart::default());
    };

    match repo.get_cart(id).map_err(ServiceError::from)? {
        Some(cart) => Ok(SessionCart { id: Some(id), cart }),
        None => {
            log::warn!("Session refers to missing cart {id}, starting a new one");
            Ok(SessionCart::default())
        }
    }
}

/// Persists the cart, creating its stored record on first use.
///
/// Returns the identifier the session should keep.
pub fn store_session_cart<R>(repo: &R, session_cart: &mut SessionCart) -> ServiceResult<i32>
where
    R: CartWriter + ?Sized,
{
    let id = match session_cart.id {
        Some(id) => id,
        None => {
            let id = repo.create_cart().map_err(ServiceError::from)?;
            session_cart.id = Some(id);
            id
        }
    };

    repo.save_cart(id, &session_cart.cart)
        .map_err(ServiceError::from)?;
    Ok(id)
}

/// Adds one unit of `product_id` to `cart`.
pub fn add_to_cart(
    catalog: &Catalog,
    cart: &mut Cart,
    product_id: i32,
) -> ServiceResult<AddToCartOutcome> {
    let line_item = match cart.add(catalog, product_id) {
        Ok(item) => CartLineItemView::from(item),
        Err(CartError::UnknownProduct(id)) => {
            log::warn!("Attempt to add unknown product {id} to a cart");
            return Err(ServiceError::NotFound);
        }
    };

    let message = format!("{} добавлен в корзину", line_item.title);

    Ok(AddToCartOutcome {
        line_item,
        cart: CartTotalsView::from_cart(cart),
        message,
    })
}

/// Removes the whole line for `product_id`; unknown products are ignored.
pub fn remove_from_cart(cart: &mut Cart, product_id: i32) -> RemoveFromCartOutcome {
    let removed = cart.remove(product_id).map(|item| CartLineItemView::from(&item));

    RemoveFromCartOutcome {
        removed,
        cart: CartTotalsView::from_cart(cart),
    }
}

/// Loads the cart contents with subtotals.
pub fn load_cart_page(cart: &Cart) -> CartPageData {
    CartPageData {
        items: cart.line_items().iter().map(CartLineItemView::from).collect(),
        cart: CartTotalsView::from_cart(cart),
    }
}

/// View model of a cart line.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartLineItemView {
    pub product_id: i32,
    pub title: String,
    pub quantity: u32,
    pub unit_price_formatted: String,
    pub subtotal_formatted: String,
}

impl From<&CartLineItem> for CartLineItemView {
    fn from(item: &CartLineItem) -> Self {
        Self {
            product_id: item.product_id,
            title: item.title.clone(),
            quantity: item.quantity,
            unit_price_formatted: item.unit_price.format(),
            subtotal_formatted: item.subtotal().format(),
        }
    }
}

/// View model of the cart badge and grand total.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartTotalsView {
    pub item_count: u64,
    pub grand_total_formatted: String,
}

impl CartTotalsView {
    pub fn from_cart(cart: &Cart) -> Self {
        let totals = cart.totals();
        Self {
            item_count: totals.item_count,
            grand_total_formatted: totals.grand_total.format(),
        }
    }
}
