//! Loads products from a JSON catalog file into the storefront database.
//!
//! Usage: `import-catalog <catalog.json>`. The database is taken from
//! `DATABASE_URL` (default `app.db`).

use std::env;

use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;

use pushkind_storefront::forms::catalog::CatalogUpload;
use pushkind_storefront::repository::{DieselRepository, ProductWriter};

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok();

    let path = match env::args().nth(1) {
        Some(path) => path,
        None => {
            log::error!("Usage: import-catalog <catalog.json>");
            std::process::exit(2);
        }
    };
    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());

    let products = match CatalogUpload::from_path(&path).and_then(CatalogUpload::into_new_products)
    {
        Ok(products) => products,
        Err(e) => {
            log::error!("Failed to read {path}: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    match repo.upsert_products(&products) {
        Ok(written) => log::info!("Imported {written} products from {path}"),
        Err(e) => {
            log::error!("Failed to import products: {e}");
            std::process::exit(1);
        }
    }
}
