use actix_session::{Session, SessionInsertError};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Serialize;
use tera::Context;
use thiserror::Error;

use crate::CART_SESSION_KEY;
use crate::models::config::StoreConfig;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, ServiceResult};
use crate::services::cart::{self as cart_service, SessionCart};

pub mod api;
pub mod cart;
pub mod main;
pub mod products;

/// Flash message prepared for the alert partial.
#[derive(Debug, Serialize)]
struct AlertView {
    message: String,
    level: &'static str,
}

/// Errors raised while writing a cart back after a command.
#[derive(Debug, Error)]
pub enum CartStorageError {
    #[error("failed to store cart: {0}")]
    Service(ServiceError),
    #[error("failed to remember cart in session: {0}")]
    Session(#[from] SessionInsertError),
}

impl From<ServiceError> for CartStorageError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

/// Identifier of the stored cart remembered by the session cookie.
fn session_cart_id(session: &Session) -> Option<i32> {
    match session.get::<i32>(CART_SESSION_KEY) {
        Ok(cart_id) => cart_id,
        Err(err) => {
            log::warn!("Discarding unreadable cart reference from session: {err}");
            None
        }
    }
}

/// Cart of the current session, loaded from the cart store.
pub fn load_cart(session: &Session, repo: &DieselRepository) -> ServiceResult<SessionCart> {
    cart_service::load_session_cart(repo, session_cart_id(session))
}

/// Cart used only for display. Storage failures fall back to an empty cart.
pub fn display_cart(session: &Session, repo: &DieselRepository) -> SessionCart {
    load_cart(session, repo).unwrap_or_else(|err| {
        log::error!("Failed to load cart: {err}");
        SessionCart::default()
    })
}

/// Writes the cart to the store and remembers a newly created cart in the session.
pub fn store_cart(
    session: &Session,
    repo: &DieselRepository,
    session_cart: &mut SessionCart,
) -> Result<(), CartStorageError> {
    let known = session_cart.id;
    let cart_id = cart_service::store_session_cart(repo, session_cart)?;
    if known != Some(cart_id) {
        session.insert(CART_SESSION_KEY, cart_id)?;
    }
    Ok(())
}

/// Template context shared by every storefront page.
pub fn storefront_context(
    flash_messages: &IncomingFlashMessages,
    store: &StoreConfig,
    current_page: &str,
) -> Context {
    let alerts: Vec<AlertView> = flash_messages
        .iter()
        .map(|message| AlertView {
            message: message.content().to_string(),
            level: alert_class(message.level()),
        })
        .collect();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("store", &store.view());
    context.insert("current_page", current_page);
    context
}

fn alert_class(level: Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}
