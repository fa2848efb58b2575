//! Helpers for integration tests.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use pushkind_common::db::{DbPool, establish_connection_pool};
use pushkind_storefront::domain::money::Percentage;
use pushkind_storefront::domain::product::NewProduct;
use pushkind_storefront::repository::DieselRepository;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Temporary database used in integration tests.
pub struct TestDb {
    filename: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        std::fs::remove_file(filename).ok(); // Clean up old DB

        let pool =
            establish_connection_pool(filename).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            filename: filename.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.filename).ok();
        std::fs::remove_file(format!("{}-shm", &self.filename)).ok();
        std::fs::remove_file(format!("{}-wal", &self.filename)).ok();
    }
}

/// Products used by the storefront scenarios: a 10% discounted item and a full price one.
#[allow(dead_code)]
pub fn sample_products() -> Vec<NewProduct> {
    vec![
        NewProduct::new("Essence Mascara Lash Princess", 10_000)
            .with_id(1)
            .with_description("The Essence Mascara Lash Princess is a popular mascara known for its volumizing and lengthening effects.")
            .with_labels("beauty", "Essence")
            .with_discount(Percentage::from_percent(10).expect("valid percentage"))
            .with_stock_and_rating(5, 4.94)
            .with_thumbnail("https://cdn.example.com/mascara.png"),
        NewProduct::new("Powder Canister", 1_499)
            .with_id(6)
            .with_description("Lightweight setting powder.")
            .with_labels("beauty", "Glamour Beauty")
            .with_stock_and_rating(89, 3.82)
            .with_thumbnail("https://cdn.example.com/powder.png"),
    ]
}
