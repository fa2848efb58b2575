use std::env;

use actix_files::Files;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;
use tera::Tera;

use pushkind_storefront::models::config::{StoreConfig, session_key};
use pushkind_storefront::repository::DieselRepository;
use pushkind_storefront::routes::api::{
    api_v1_add_cart_item, api_v1_cart, api_v1_product, api_v1_products, api_v1_remove_cart_item,
};
use pushkind_storefront::routes::cart::{add_to_cart, remove_from_cart, show_cart};
use pushkind_storefront::routes::main::show_index;
use pushkind_storefront::routes::products::show_product;
use pushkind_storefront::services::catalog::load_catalog;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let secret_key = match session_key(env::var("SECRET_KEY").ok().as_deref()) {
        Ok(key) => key,
        Err(e) => {
            log::error!("Invalid session configuration: {e}");
            std::process::exit(1);
        }
    };

    let domain = env::var("DOMAIN").unwrap_or("localhost".to_string());
    let store_config = StoreConfig::from_env();

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let catalog = match load_catalog(&repo) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Failed to load the catalog: {e}");
            std::process::exit(1);
        }
    };
    log::info!("Catalog loaded with {} products", catalog.len());
    let catalog = web::Data::new(catalog);
    let store_config = web::Data::new(store_config);
    let repo = web::Data::new(repo);

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(
                web::scope("/api")
                    .service(api_v1_products)
                    .service(api_v1_product)
                    .service(api_v1_cart)
                    .service(api_v1_add_cart_item)
                    .service(api_v1_remove_cart_item),
            )
            .service(show_index)
            .service(show_product)
            .service(show_cart)
            .service(add_to_cart)
            .service(remove_from_cart)
            .app_data(web::Data::new(tera.clone()))
            .app_data(catalog.clone())
            .app_data(store_config.clone())
            .app_data(repo.clone())
    })
    .bind((address, port))?
    .run()
    .await
}
