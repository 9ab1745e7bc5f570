//! Local relational cache of users
//!
//! Declared alongside the record store but not consulted by the screen flow
//! or the user endpoints. The query engine is SQLite via sqlx.

pub mod dao;

pub use dao::UserDao;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::error::Result;

/// Open the cache database and apply its migrations
pub async fn open_cache(database_url: &str) -> Result<SqlitePool> {
    tracing::info!("Opening local cache at: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // Every connection to an in-memory database sees its own empty database
    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(600))
    };

    let pool = pool_options.connect_with(options).await?;

    tracing::info!("Running cache migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Cache migrations complete");

    Ok(pool)
}
