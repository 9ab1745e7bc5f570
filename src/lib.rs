//! Account Manager Server Library
//!
//! A user-account service: a record store holding the `users` collection,
//! a screen controller reproducing the register/list/edit flow, and the HTTP
//! routes exposing both. This module exports the core types for testing and
//! reuse.

pub mod cache;
pub mod config;
pub mod constants;
pub mod controller;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

pub use config::Config;
pub use db::{open_database, Db};
pub use error::{AppError, Result};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;

use cache::UserDao;
use controller::ScreenController;
use store::DocumentStore;

/// Screen session shared by every request
pub type SharedScreen = Arc<Mutex<ScreenController<DocumentStore>>>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: DocumentStore,
    pub cache: Option<UserDao>,
    pub screen: SharedScreen,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState; the screen session starts on the list, fetched
    pub async fn new(db: Db, cache: Option<UserDao>, config: Config) -> Self {
        let store = DocumentStore::new(db);
        let screen = ScreenController::start(store.clone()).await;

        Self {
            store,
            cache,
            screen: Arc::new(Mutex::new(screen)),
            config,
        }
    }
}

/// Build the router with every endpoint; middleware is added by the caller
pub fn build_router(state: AppState) -> Router {
    use routes::*;

    Router::new()
        .route("/health", get(health_check))
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/screen", get(current_screen))
        .route("/api/screen/events", post(screen_event))
        .with_state(state)
}
