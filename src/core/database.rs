use crate::core::config::DatabaseConfig;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use std::str::FromStr;
use std::time::Duration;

/// Create the Postgres pool backing the photo store.
///
/// The server-side `statement_timeout` mirrors the configured query timeout so
/// an abandoned query does not keep running after the caller has given up.
pub async fn create_pool(config: &DatabaseConfig, url: &str) -> Result<PgPool, sqlx::Error> {
    let timeout_ms = config.query_timeout.as_millis();
    let opts = PgConnectOptions::from_str(url)?
        .options([("statement_timeout", format!("{}ms", timeout_ms))]);
    tracing::info!("PostgreSQL statement_timeout set to {}ms", timeout_ms);

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect_with(opts)
        .await
}
