use chrono::Utc;
use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::cart::Cart,
    models::cart::{CartItem as DbCartItem, NewCart as DbNewCart, NewCartItem as DbNewCartItem},
    repository::{CartReader, CartWriter, DieselRepository},
};

impl CartReader for DieselRepository {
    fn get_cart(&self, cart_id: i32) -> RepositoryResult<Option<Cart>> {
        use crate::schema::{cart_items, carts};

        let mut conn = self.conn()?;

        let exists = carts::table
            .find(cart_id)
            .select(carts::id)
            .first::<i32>(&mut conn)
            .optional()?;
        if exists.is_none() {
            return Ok(None);
        }

        let items = cart_items::table
            .filter(cart_items::cart_id.eq(cart_id))
            .order(cart_items::id.asc())
            .load::<DbCartItem>(&mut conn)?;

        Ok(Some(Cart::from_line_items(items.into_iter().map(Into::into))))
    }
}

impl CartWriter for DieselRepository {
    fn create_cart(&self) -> RepositoryResult<i32> {
        use crate::schema::carts;

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();
        let db_new = DbNewCart {
            created_at: now,
            updated_at: now,
        };

        let cart_id = diesel::insert_into(carts::table)
            .values(&db_new)
            .returning(carts::id)
            .get_result::<i32>(&mut conn)?;

        Ok(cart_id)
    }

    fn save_cart(&self, cart_id: i32, cart: &Cart) -> RepositoryResult<()> {
        use crate::schema::{cart_items, carts};

        let payload = cart
            .line_items()
            .iter()
            .map(|item| DbNewCartItem::from_domain(cart_id, item))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| diesel::result::Error::SerializationError(Box::new(err)))?;

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let updated = diesel::update(carts::table.find(cart_id))
                .set(carts::updated_at.eq(Utc::now().naive_utc()))
                .execute(conn)?;
            if updated == 0 {
                return Err(RepositoryError::NotFound);
            }

            diesel::delete(cart_items::table.filter(cart_items::cart_id.eq(cart_id)))
                .execute(conn)?;

            if !payload.is_empty() {
                diesel::insert_into(cart_items::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            Ok(())
        })
    }
}
