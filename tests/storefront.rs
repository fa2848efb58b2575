use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use serde_json::Value;
use tera::Tera;

use pushkind_storefront::domain::catalog::Catalog;
use pushkind_storefront::domain::product::NewProduct;
use pushkind_storefront::models::config::StoreConfig;
use pushkind_storefront::repository::ProductWriter;
use pushkind_storefront::routes::api::{
    api_v1_add_cart_item, api_v1_cart, api_v1_product, api_v1_products, api_v1_remove_cart_item,
};
use pushkind_storefront::routes::cart::{add_to_cart, remove_from_cart, show_cart};
use pushkind_storefront::routes::main::show_index;
use pushkind_storefront::routes::products::show_product;
use pushkind_storefront::services::catalog::load_catalog;

mod common;

const SESSION_COOKIE: &str = "id";

fn seeded_catalog(filename: &str) -> (common::TestDb, Catalog) {
    seeded_catalog_with(filename, &common::sample_products())
}

fn seeded_catalog_with(filename: &str, products: &[NewProduct]) -> (common::TestDb, Catalog) {
    let test_db = common::TestDb::new(filename);
    let repo = test_db.repo();
    repo.upsert_products(products).expect("seed products");
    let catalog = match load_catalog(&repo) {
        Ok(catalog) => catalog,
        Err(err) => panic!("expected catalog, got error: {err}"),
    };
    (test_db, catalog)
}

fn templates() -> Tera {
    Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*")).expect("templates parse")
}

fn session_cookie(resp: &ServiceResponse) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.into_owned())
}

fn with_session(request: test::TestRequest, cookie: &Option<Cookie<'static>>) -> test::TestRequest {
    match cookie {
        Some(cookie) => request.cookie(cookie.clone()),
        None => request,
    }
}

macro_rules! storefront_app {
    ($catalog:expr, $repo:expr) => {{
        let key = Key::generate();
        let message_store = CookieMessageStore::builder(key.clone()).build();
        test::init_service(
            App::new()
                .wrap(FlashMessagesFramework::builder(message_store).build())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), key)
                        .cookie_secure(false)
                        .build(),
                )
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
                .app_data(web::Data::new(templates()))
                .app_data(web::Data::new($catalog))
                .app_data(web::Data::new($repo))
                .app_data(web::Data::new(StoreConfig::default())),
        )
        .await
    }};
}

#[actix_web::test]
async fn api_cart_add_increment_remove_scenario() {
    let (db, catalog) = seeded_catalog("test_api_cart_scenario.db");
    let mascara_id = catalog.products()[0].id;
    let app = storefront_app!(catalog, db.repo());
    let mut cookie = None;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/cart/items/{mascara_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    cookie = session_cookie(&resp).or(cookie);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["line_item"]["quantity"], 1);
    assert_eq!(body["line_item"]["unit_price_formatted"], "90.00");
    assert_eq!(body["cart"]["item_count"], 1);
    assert_eq!(body["cart"]["grand_total_formatted"], "90.00");

    let resp = test::call_service(
        &app,
        with_session(
            test::TestRequest::post().uri(&format!("/api/v1/cart/items/{mascara_id}")),
            &cookie,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    cookie = session_cookie(&resp).or(cookie);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["line_item"]["quantity"], 2);
    assert_eq!(body["line_item"]["unit_price_formatted"], "90.00");
    assert_eq!(body["cart"]["item_count"], 2);
    assert_eq!(body["cart"]["grand_total_formatted"], "180.00");

    let resp = test::call_service(
        &app,
        with_session(test::TestRequest::post().uri("/api/v1/cart/items/99999"), &cookie)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &app,
        with_session(test::TestRequest::get().uri("/api/v1/cart"), &cookie).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["cart"]["item_count"], 2);

    let resp = test::call_service(
        &app,
        with_session(
            test::TestRequest::delete().uri(&format!("/api/v1/cart/items/{mascara_id}")),
            &cookie,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    cookie = session_cookie(&resp).or(cookie);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["removed"]["quantity"], 2);
    assert_eq!(body["cart"]["item_count"], 0);
    assert_eq!(body["cart"]["grand_total_formatted"], "0.00");

    let resp = test::call_service(
        &app,
        with_session(
            test::TestRequest::delete().uri(&format!("/api/v1/cart/items/{mascara_id}")),
            &cookie,
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["removed"].is_null());
    assert_eq!(body["cart"]["item_count"], 0);
}

#[actix_web::test]
async fn api_products_expose_prices() {
    let (db, catalog) = seeded_catalog("test_api_products_expose_prices.db");
    let mascara_id = catalog.products()[0].id;
    let app = storefront_app!(catalog, db.repo());

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/products").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/products/{mascara_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["price_formatted"], "100.00");
    assert_eq!(body["discounted_price_formatted"], "90.00");
    assert_eq!(body["discount_formatted"], "10");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/products/99999")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn html_pages_follow_cart_state() {
    let (db, catalog) = seeded_catalog("test_html_pages_follow_cart_state.db");
    let mascara_id = catalog.products()[0].id;
    let app = storefront_app!(catalog, db.repo());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf-8 page");
    assert!(body.contains("Essence Mascara Lash Princess"));
    assert!(body.contains("Powder Canister"));
    assert!(body.contains("-10%"));

    let return_to = format!("/products/{mascara_id}");
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/cart/add/{mascara_id}"))
            .set_form([("return_to", return_to.as_str())])
            .to_request(),
    )
    .await;
    assert!(resp.status().is_redirection());
    assert_eq!(
        resp.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some(return_to.as_str())
    );
    let cookie = session_cookie(&resp);
    assert!(cookie.is_some());

    let resp = test::call_service(
        &app,
        with_session(test::TestRequest::get().uri("/cart"), &cookie).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf-8 page");
    assert!(body.contains("Essence Mascara Lash Princess"));
    assert!(body.contains("1 x €90.00"));
    assert!(body.contains(r#"<span id="cartTotal">90.00</span>"#));

    let resp = test::call_service(
        &app,
        with_session(
            test::TestRequest::post()
                .uri(&format!("/cart/remove/{mascara_id}"))
                .set_form([("return_to", "/cart")]),
            &cookie,
        )
        .to_request(),
    )
    .await;
    assert!(resp.status().is_redirection());
    let cookie = session_cookie(&resp).or(cookie);

    let resp = test::call_service(
        &app,
        with_session(test::TestRequest::get().uri("/cart"), &cookie).to_request(),
    )
    .await;
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf-8 page");
    assert!(body.contains("Корзина пуста."));
    assert!(body.contains(r#"<span id="cartTotal">0.00</span>"#));
}

#[actix_web::test]
async fn html_unknown_product_redirects_home() {
    let (db, catalog) = seeded_catalog("test_html_unknown_product_redirects_home.db");
    let app = storefront_app!(catalog, db.repo());

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/products/99999").to_request(),
    )
    .await;
    assert!(resp.status().is_redirection());
    assert_eq!(
        resp.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/")
    );

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/cart/add/99999")
            .set_form([("return_to", "https://evil.example")])
            .to_request(),
    )
    .await;
    assert!(resp.status().is_redirection());
    assert_eq!(
        resp.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/")
    );
    assert!(session_cookie(&resp).is_none());
}

#[actix_web::test]
async fn api_cart_holds_many_distinct_products() {
    let products: Vec<NewProduct> = (1..=40)
        .map(|id| {
            NewProduct::new(format!("Essence Mascara Lash Princess {id}"), 999)
                .with_id(id)
                .with_description("Popular mascara known for its volumizing effect.")
        })
        .collect();
    let (db, catalog) = seeded_catalog_with("test_api_cart_holds_many_products.db", &products);
    let app = storefront_app!(catalog, db.repo());
    let mut cookie: Option<Cookie<'static>> = None;

    for id in 1..=40 {
        let resp = test::call_service(
            &app,
            with_session(
                test::TestRequest::post().uri(&format!("/api/v1/cart/items/{id}")),
                &cookie,
            )
            .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        cookie = session_cookie(&resp).or(cookie);
        assert!(cookie.as_ref().is_some_and(|cookie| cookie.value().len() < 512));
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["cart"]["item_count"], id);
    }

    let resp = test::call_service(
        &app,
        with_session(test::TestRequest::get().uri("/api/v1/cart"), &cookie).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let items = body["items"].as_array().expect("items array");
    assert_eq!(items.len(), 40);
    assert_eq!(items[0]["title"], "Essence Mascara Lash Princess 1");
    assert_eq!(items[39]["product_id"], 40);
    assert_eq!(body["cart"]["item_count"], 40);
    assert_eq!(body["cart"]["grand_total_formatted"], "399.60");
}
