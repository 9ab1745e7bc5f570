use axum::{extract::State, Json};
use redb::ReadableDatabase;
use serde_json::{json, Value};

use crate::AppState;

/// Health check endpoint
///
/// Reports the record store and, when one is configured, the local cache.
/// Used by load balancers and monitoring systems.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    // Check database connectivity by attempting a read transaction
    let db = state.store.db().clone();
    let db_status = tokio::task::spawn_blocking(move || match db.begin_read() {
        Ok(_) => "connected",
        Err(e) => {
            tracing::error!("Record store health check failed: {:?}", e);
            "disconnected"
        }
    })
    .await
    .unwrap_or("error");

    let cache_status = match &state.cache {
        Some(cache) => match cache.ping().await {
            Ok(()) => "connected",
            Err(e) => {
                tracing::error!("Cache health check failed: {:?}", e);
                "disconnected"
            }
        },
        None => "disabled",
    };

    // The cache never serves requests, so it does not decide overall health
    Json(json!({
        "status": if db_status == "connected" { "healthy" } else { "unhealthy" },
        "database": db_status,
        "cache": cache_status,
        "environment": state.config.environment,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
