use actix_session::Session;
use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::domain::cart::Cart;
use crate::domain::catalog::Catalog;
use crate::repository::DieselRepository;
use crate::routes::{load_cart, store_cart};
use crate::services::catalog::{self as catalog_service, IndexQuery};
use crate::services::{ServiceError, cart as cart_service};

#[get("/v1/products")]
/// Return the catalog as JSON, optionally filtered by `category`.
pub async fn api_v1_products(
    params: web::Query<IndexQuery>,
    catalog: web::Data<Catalog>,
) -> impl Responder {
    let data = catalog_service::load_index_page(catalog.get_ref(), &Cart::new(), params.into_inner());
    HttpResponse::Ok().json(data.products)
}

#[get("/v1/products/{product_id}")]
/// Return a single product, or `404 Not Found` for an unknown identifier.
pub async fn api_v1_product(
    product_id: web::Path<i32>,
    catalog: web::Data<Catalog>,
) -> impl Responder {
    match catalog_service::find_product(catalog.get_ref(), product_id.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load product: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/cart")]
/// Return the session cart with subtotals and the cart summary.
pub async fn api_v1_cart(session: Session, repo: web::Data<DieselRepository>) -> impl Responder {
    match load_cart(&session, repo.get_ref()) {
        Ok(session_cart) => {
            HttpResponse::Ok().json(cart_service::load_cart_page(&session_cart.cart))
        }
        Err(err) => {
            log::error!("Failed to load cart: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/v1/cart/items/{product_id}")]
/// Add one unit of a product and return the resulting line item.
///
/// Unknown products receive `404 Not Found` and leave the cart untouched.
pub async fn api_v1_add_cart_item(
    product_id: web::Path<i32>,
    session: Session,
    catalog: web::Data<Catalog>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = product_id.into_inner();
    let mut session_cart = match load_cart(&session, repo.get_ref()) {
        Ok(session_cart) => session_cart,
        Err(err) => {
            log::error!("Failed to load cart: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match cart_service::add_to_cart(catalog.get_ref(), &mut session_cart.cart, product_id) {
        Ok(outcome) => match store_cart(&session, repo.get_ref(), &mut session_cart) {
            Ok(()) => HttpResponse::Ok().json(outcome),
            Err(err) => {
                log::error!("Failed to store cart after adding product {product_id}: {err}");
                HttpResponse::InternalServerError().finish()
            }
        },
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to add product {product_id} to cart: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[delete("/v1/cart/items/{product_id}")]
/// Remove a whole line item. Removing an absent product still succeeds.
pub async fn api_v1_remove_cart_item(
    product_id: web::Path<i32>,
    session: Session,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = product_id.into_inner();
    let mut session_cart = match load_cart(&session, repo.get_ref()) {
        Ok(session_cart) => session_cart,
        Err(err) => {
            log::error!("Failed to load cart: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let outcome = cart_service::remove_from_cart(&mut session_cart.cart, product_id);
    if outcome.removed.is_some() {
        if let Err(err) = store_cart(&session, repo.get_ref(), &mut session_cart) {
            log::error!("Failed to store cart after removing product {product_id}: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }
    HttpResponse::Ok().json(outcome)
}
