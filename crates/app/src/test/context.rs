//! Test context for service-level integration tests.

use sqlx::{Connection, PgConnection, PgPool, query};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{shops::ShopDomain, timers::PgTimersService},
};

use super::db::{SUPERUSER, SUPERUSER_PASSWORD, TestDb};

/// Non-superuser role the services connect as, so RLS policies apply.
const APP_ROLE: &str = "countdown_app_test";
const APP_ROLE_PASSWORD: &str = "countdown_app_test_pass";

pub struct TestContext {
    pub db: TestDb,
    pub shop: ShopDomain,
    pub timers: PgTimersService,
}

impl TestContext {
    pub async fn new() -> Self {
        let db = TestDb::new().await;
        let app_pool = Self::setup_app_pool(&db).await;

        Self {
            timers: PgTimersService::new(Db::new(app_pool)),
            shop: random_shop(),
            db,
        }
    }

    /// A second shop with no timers, for isolation tests.
    pub fn other_shop(&self) -> ShopDomain {
        random_shop()
    }

    /// Create the app role (once per server) and return a pool connected as it.
    ///
    /// Superusers bypass RLS even with `FORCE ROW LEVEL SECURITY`.
    async fn setup_app_pool(test_db: &TestDb) -> PgPool {
        let su_url = &test_db.superuser_url;

        let server_url = su_url.rsplit_once('/').map_or(su_url.as_str(), |x| x.0);

        let mut server_conn = PgConnection::connect(&format!("{server_url}/postgres"))
            .await
            .expect("Failed to connect to postgres database for role setup");

        // Parallel tests race to create the role; 42710 (duplicate object) and
        // 23505 (unique violation in pg_authid) both mean it exists.
        let created = query(&format!(
            "CREATE ROLE {APP_ROLE} WITH LOGIN PASSWORD '{APP_ROLE_PASSWORD}' \
               NOSUPERUSER NOCREATEDB NOCREATEROLE NOBYPASSRLS"
        ))
        .execute(&mut server_conn)
        .await;

        match created {
            Ok(_) => {}
            Err(sqlx::Error::Database(ref e))
                if matches!(e.code().as_deref(), Some("42710" | "23505")) => {}
            Err(error) => panic!("Failed to create app role: {error}"),
        }

        query(&format!(
            "GRANT CONNECT ON DATABASE \"{}\" TO {APP_ROLE}",
            test_db.name
        ))
        .execute(&mut server_conn)
        .await
        .expect("Failed to grant CONNECT on test database");

        server_conn
            .close()
            .await
            .expect("Failed to close server connection");

        let mut db_conn = PgConnection::connect(su_url)
            .await
            .expect("Failed to connect to test database for privilege setup");

        for stmt in [
            format!("GRANT USAGE ON SCHEMA public TO {APP_ROLE}"),
            format!(
                "GRANT SELECT, INSERT, UPDATE, DELETE ON ALL TABLES IN SCHEMA public TO {APP_ROLE}"
            ),
        ] {
            query(&stmt)
                .execute(&mut db_conn)
                .await
                .expect("Failed to grant table privileges to app role");
        }

        db_conn
            .close()
            .await
            .expect("Failed to close db connection");

        let app_url = su_url.replacen(
            &format!("{SUPERUSER}:{SUPERUSER_PASSWORD}"),
            &format!("{APP_ROLE}:{APP_ROLE_PASSWORD}"),
            1,
        );

        PgPool::connect(&app_url)
            .await
            .expect("Failed to create app pool")
    }
}

fn random_shop() -> ShopDomain {
    ShopDomain::parse(&format!("shop-{}.myshopify.com", Uuid::now_v7().simple()))
        .expect("generated shop domain should be valid")
}

#[cfg(test)]
mod tests {
    use sqlx::query_scalar;
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn app_role_cannot_read_other_shops_rows() -> TestResult {
        let ctx = TestContext::new().await;

        // Insert directly as superuser, bypassing the service.
        query(
            "INSERT INTO timers (uuid, shop, title, description, starts_at, ends_at) \
             VALUES ($1, $2, 'Sale', 'd', now(), now() + interval '1 hour')",
        )
        .bind(Uuid::now_v7())
        .bind(ctx.other_shop().as_str())
        .execute(ctx.db.pool())
        .await?;

        let app_pool = TestContext::setup_app_pool(&ctx.db).await;
        let mut tx = Db::new(app_pool).begin_shop_transaction(&ctx.shop).await?;

        // No shop filter: only the policy hides the row.
        let visible: i64 = query_scalar("SELECT count(*) FROM timers")
            .fetch_one(&mut *tx)
            .await?;

        assert_eq!(visible, 0);

        Ok(())
    }
}
