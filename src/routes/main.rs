use actix_session::Session;
use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use pushkind_common::routes::render_template;
use tera::Tera;

use crate::domain::catalog::Catalog;
use crate::models::config::StoreConfig;
use crate::repository::DieselRepository;
use crate::routes::{display_cart, storefront_context};
use crate::services::catalog::{self as catalog_service, IndexQuery};

#[get("/")]
pub async fn show_index(
    params: web::Query<IndexQuery>,
    session: Session,
    catalog: web::Data<Catalog>,
    repo: web::Data<DieselRepository>,
    store: web::Data<StoreConfig>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let session_cart = display_cart(&session, repo.get_ref());
    let data =
        catalog_service::load_index_page(catalog.get_ref(), &session_cart.cart, params.into_inner());

    let mut context = storefront_context(&flash_messages, store.get_ref(), "index");
    context.insert("products", &data.products);
    context.insert("categories", &data.categories);
    context.insert("category", &data.category);
    context.insert("cart", &data.cart);
    render_template(&tera, "main/index.html", &context)
}
