use mockall::mock;

use super::{CartReader, CartWriter, ProductReader};
use crate::domain::cart::Cart;
use crate::domain::product::Product;
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn list_products(&self) -> RepositoryResult<Vec<Product>>;
    }
}

mock! {
    pub CartStore {}

    impl CartReader for CartStore {
        fn get_cart(&self, cart_id: i32) -> RepositoryResult<Option<Cart>>;
    }

    impl CartWriter for CartStore {
        fn create_cart(&self) -> RepositoryResult<i32>;
        fn save_cart(&self, cart_id: i32, cart: &Cart) -> RepositoryResult<()>;
    }
}
