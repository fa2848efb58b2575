use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::routes::{redirect, render_template};
use tera::Tera;

use crate::domain::catalog::Catalog;
use crate::models::config::StoreConfig;
use crate::repository::DieselRepository;
use crate::routes::{display_cart, storefront_context};
use crate::services::{ServiceError, catalog as catalog_service};

#[get("/products/{product_id}")]
pub async fn show_product(
    product_id: web::Path<i32>,
    session: Session,
    catalog: web::Data<Catalog>,
    repo: web::Data<DieselRepository>,
    store: web::Data<StoreConfig>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = product_id.into_inner();
    let session_cart = display_cart(&session, repo.get_ref());

    match catalog_service::load_product_page(catalog.get_ref(), &session_cart.cart, product_id)
    {
        Ok(data) => {
            let mut context = storefront_context(&flash_messages, store.get_ref(), "product");
            context.insert("product", &data.product);
            context.insert("cart", &data.cart);
            render_template(&tera, "products/show.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Товар не найден.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
