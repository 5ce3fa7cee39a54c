//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor and
//! into the route guard middleware. Clone is cheap: the pool is internally
//! reference counted and the config sits behind an `Arc`.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, config: ServerConfig) -> Self {
        Self { pool, config: Arc::new(config) }
    }
}
