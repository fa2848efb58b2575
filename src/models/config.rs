use actix_web::cookie::Key;
use serde::Serialize;
use thiserror::Error;

use crate::domain::money::Money;

/// Minimum length of `SECRET_KEY` accepted for signing session cookies.
pub const SECRET_KEY_MIN_LEN: usize = 64;

/// Errors raised while reading server settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SECRET_KEY must be at least {SECRET_KEY_MIN_LEN} bytes long, got {0}")]
    SecretKeyTooShort(usize),
}

/// Session signing key from the configured secret.
///
/// Without a secret a random key is generated, so sessions do not survive a restart.
pub fn session_key(secret: Option<&str>) -> Result<Key, ConfigError> {
    match secret {
        Some(secret) => Key::try_from(secret.as_bytes())
            .map_err(|_| ConfigError::SecretKeyTooShort(secret.len())),
        None => {
            log::warn!("SECRET_KEY is not set, carts will not survive a restart");
            Ok(Key::generate())
        }
    }
}

/// Store information displayed in the storefront header and footer.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Name of the shop.
    pub name: String,
    /// Postal address of the shop.
    pub address: String,
    /// Accepted payment methods, in display order.
    pub payment_methods: Vec<String>,
    /// Flat shipping fee.
    pub shipping_cost: Money,
    /// Order amount above which shipping is free.
    pub free_shipping_threshold: Money,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "Pushkind Store".to_string(),
            address: String::new(),
            payment_methods: Vec::new(),
            shipping_cost: Money::ZERO,
            free_shipping_threshold: Money::ZERO,
        }
    }
}

impl StoreConfig {
    /// Read the store settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the store settings from an arbitrary variable source.
    ///
    /// Missing variables keep their defaults; malformed amounts are logged
    /// and replaced by zero.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let name = lookup("STORE_NAME")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.name);
        let address = lookup("STORE_ADDRESS")
            .map(|value| value.trim().to_string())
            .unwrap_or(defaults.address);
        let payment_methods = lookup("STORE_PAYMENT_METHODS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|method| !method.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or(defaults.payment_methods);

        Self {
            name,
            address,
            payment_methods,
            shipping_cost: amount_var(&lookup, "STORE_SHIPPING_COST"),
            free_shipping_threshold: amount_var(&lookup, "STORE_FREE_SHIPPING_THRESHOLD"),
        }
    }

    /// Display-ready copy of the settings for templates.
    pub fn view(&self) -> StoreView {
        StoreView {
            name: self.name.clone(),
            address: self.address.clone(),
            payment_methods: self.payment_methods.clone(),
            shipping_cost: self.shipping_cost.format(),
            free_shipping_threshold: self.free_shipping_threshold.format(),
        }
    }
}

fn amount_var<F>(lookup: &F, key: &str) -> Money
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match Money::parse(&raw) {
            Ok(amount) => amount,
            Err(err) => {
                log::warn!("Ignoring {key}: {err}");
                Money::ZERO
            }
        },
        None => Money::ZERO,
    }
}

/// Store settings with amounts already formatted for display.
#[derive(Debug, Clone, Serialize)]
pub struct StoreView {
    pub name: String,
    pub address: String,
    pub payment_methods: Vec<String>,
    pub shipping_cost: String,
    pub free_shipping_threshold: String,
}
