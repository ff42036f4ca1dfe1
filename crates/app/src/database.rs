//! Database connection management

use sqlx::{PgPool, Postgres, Transaction, migrate::MigrateError, query};

use crate::domain::shops::ShopDomain;

/// SQL used to set shop context for row-level security.
pub const SET_SHOP_CONTEXT_SQL: &str = "SELECT set_config('app.current_shop', $1, true)";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction and set shop context for RLS policies.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting shop context fails.
    pub async fn begin_shop_transaction(
        &self,
        shop: &ShopDomain,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_SHOP_CONTEXT_SQL)
            .bind(shop.as_str())
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply pending migrations.
///
/// # Errors
///
/// Returns an error if a migration fails or the history does not match.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
