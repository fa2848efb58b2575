use chrono::Utc;
use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct},
    models::product::{NewProduct as DbNewProduct, Product as DbProduct, ProductChangeset},
    repository::{DieselRepository, ProductReader, ProductWriter},
};

impl ProductReader for DieselRepository {
    fn list_products(&self) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_products = products::table
            .order(products::id.asc())
            .load::<DbProduct>(&mut conn)?;

        Ok(db_products.into_iter().map(Into::into).collect())
    }
}

impl ProductWriter for DieselRepository {
    fn upsert_products(&self, new_products: &[DomainNewProduct]) -> RepositoryResult<usize> {
        use crate::schema::products;

        if new_products.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            let mut count_written: usize = 0;

            for new in new_products {
                let db_new = DbNewProduct::from(new);
                let changes = ProductChangeset::from_domain(new, now);

                count_written += diesel::insert_into(products::table)
                    .values(&db_new)
                    .on_conflict(products::id)
                    .do_update()
                    .set(&changes)
                    .execute(conn)?;
            }

            Ok(count_written)
        })
    }
}
