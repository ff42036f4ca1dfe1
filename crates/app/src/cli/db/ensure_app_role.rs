use clap::Args;
use countdown_app::database;
use sqlx::{Postgres, Transaction, query, query_scalar};

#[derive(Debug, Args)]
pub(crate) struct EnsureAppRoleArgs {
    /// Administrative PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Role the HTTP server connects as
    #[arg(long, default_value = "countdown_app")]
    role_name: String,

    /// Password to set on the role
    #[arg(long, env = "APP_DB_PASSWORD", hide_env_values = true)]
    password: String,
}

/// Quote `value` server-side with the given quoting function.
async fn quote(
    tx: &mut Transaction<'_, Postgres>,
    function: &str,
    value: &str,
) -> Result<String, String> {
    query_scalar(&format!("SELECT {function}($1)"))
        .bind(value)
        .fetch_one(&mut **tx)
        .await
        .map_err(|error| format!("failed to {function} value: {error}"))
}

pub(crate) async fn run(args: EnsureAppRoleArgs) -> Result<(), String> {
    if args.role_name.trim().is_empty() {
        return Err("role_name cannot be empty".to_string());
    }

    if args.password.trim().is_empty() {
        return Err("password cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|error| format!("failed to start transaction: {error}"))?;

    let role = quote(&mut tx, "quote_ident", &args.role_name).await?;
    let password = quote(&mut tx, "quote_literal", &args.password).await?;

    let exists: bool = query_scalar("SELECT EXISTS (SELECT 1 FROM pg_roles WHERE rolname = $1)")
        .bind(&args.role_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|error| format!("failed to check role existence: {error}"))?;

    // The server role must never bypass the shop isolation policy.
    let verb = if exists { "ALTER" } else { "CREATE" };

    let statements = [
        format!(
            "{verb} ROLE {role} LOGIN PASSWORD {password} \
             NOSUPERUSER NOCREATEDB NOCREATEROLE NOREPLICATION NOBYPASSRLS"
        ),
        format!("GRANT CONNECT ON DATABASE {} TO {role}", current_database(&mut tx).await?),
        format!("GRANT USAGE ON SCHEMA public TO {role}"),
        format!("GRANT SELECT, INSERT, UPDATE, DELETE ON ALL TABLES IN SCHEMA public TO {role}"),
        format!(
            "ALTER DEFAULT PRIVILEGES IN SCHEMA public \
             GRANT SELECT, INSERT, UPDATE, DELETE ON TABLES TO {role}"
        ),
    ];

    for sql in statements {
        query(&sql)
            .execute(&mut *tx)
            .await
            .map_err(|error| format!("failed to apply `{verb} ROLE`/grants: {error}"))?;
    }

    tx.commit()
        .await
        .map_err(|error| format!("failed to commit changes: {error}"))?;

    println!("ensured app role: {}", args.role_name);

    Ok(())
}

async fn current_database(tx: &mut Transaction<'_, Postgres>) -> Result<String, String> {
    query_scalar("SELECT quote_ident(current_database())")
        .fetch_one(&mut **tx)
        .await
        .map_err(|error| format!("failed to resolve database name: {error}"))
}
