use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::AppConfig;

/// Build a lazily-connecting pool. Connections are opened on first query, so a
/// backend outage shows up as fetch failures on the dashboard rather than a boot failure.
pub fn init_pool(database_url: &str, config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy(database_url)?;
    log::info!(
        "Database pool configured (max_connections={}, acquire_timeout={}s)",
        config.max_connections,
        config.acquire_timeout.as_secs()
    );
    Ok(pool)
}
