use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::routes::{redirect, render_template};
use tera::Tera;

use crate::domain::catalog::Catalog;
use crate::forms::cart::CartActionForm;
use crate::models::config::StoreConfig;
use crate::repository::DieselRepository;
use crate::routes::{display_cart, load_cart, store_cart, storefront_context};
use crate::services::{ServiceError, cart as cart_service};

#[get("/cart")]
pub async fn show_cart(
    session: Session,
    repo: web::Data<DieselRepository>,
    store: web::Data<StoreConfig>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let session_cart = display_cart(&session, repo.get_ref());
    let data = cart_service::load_cart_page(&session_cart.cart);

    let mut context = storefront_context(&flash_messages, store.get_ref(), "cart");
    context.insert("items", &data.items);
    context.insert("cart", &data.cart);
    render_template(&tera, "cart/index.html", &context)
}

#[post("/cart/add/{product_id}")]
pub async fn add_to_cart(
    product_id: web::Path<i32>,
    session: Session,
    catalog: web::Data<Catalog>,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<CartActionForm>,
) -> impl Responder {
    let product_id = product_id.into_inner();
    let return_to = form.redirect_target("/");
    let mut session_cart = match load_cart(&session, repo.get_ref()) {
        Ok(session_cart) => session_cart,
        Err(err) => {
            log::error!("Failed to load cart: {err}");
            FlashMessage::error("Не удалось обновить корзину.").send();
            return redirect(return_to);
        }
    };

    match cart_service::add_to_cart(catalog.get_ref(), &mut session_cart.cart, product_id) {
        Ok(outcome) => {
            if let Err(err) = store_cart(&session, repo.get_ref(), &mut session_cart) {
                log::error!("Failed to store cart after adding product {product_id}: {err}");
                FlashMessage::error("Не удалось обновить корзину.").send();
                return redirect(return_to);
            }
            FlashMessage::success(outcome.message).send();
            redirect(return_to)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Товар не найден.").send();
            redirect(return_to)
        }
        Err(err) => {
            log::error!("Failed to add product {product_id} to cart: {err}");
            FlashMessage::error("Ошибка при добавлении товара в корзину.").send();
            redirect(return_to)
        }
    }
}

#[post("/cart/remove/{product_id}")]
pub async fn remove_from_cart(
    product_id: web::Path<i32>,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<CartActionForm>,
) -> impl Responder {
    let product_id = product_id.into_inner();
    let return_to = form.redirect_target("/cart");
    let mut session_cart = match load_cart(&session, repo.get_ref()) {
        Ok(session_cart) => session_cart,
        Err(err) => {
            log::error!("Failed to load cart: {err}");
            FlashMessage::error("Не удалось обновить корзину.").send();
            return redirect(return_to);
        }
    };

    let outcome = cart_service::remove_from_cart(&mut session_cart.cart, product_id);
    if outcome.removed.is_none() {
        return redirect(return_to);
    }

    if let Err(err) = store_cart(&session, repo.get_ref(), &mut session_cart) {
        log::error!("Failed to store cart after removing product {product_id}: {err}");
        FlashMessage::error("Не удалось обновить корзину.").send();
    }
    redirect(return_to)
}
