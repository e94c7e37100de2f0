use std::sync::Arc;

use axum::Router;

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use db::Database;

/// Shared by every handler; the pool is the only thing requests share.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
}

impl AppState {
    pub fn new(db: impl Database + 'static) -> Self {
        Self { db: Arc::new(db) }
    }
}

pub fn app(state: AppState) -> Router {
    routes::router(state)
}
