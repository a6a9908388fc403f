//! Ecodash dashboard server
//!
//! Wires the read-only data store, the chart renderer, and the export
//! pipeline behind an axum router serving the browser dashboard.

pub mod export;
pub mod page;
pub mod routes;

use ecodash_config::Config;
use ecodash_data::DataStore;
use std::sync::Arc;

/// Shared application state for all request handlers.
///
/// The store is loaded once before the router is built and never written
/// afterwards, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DataStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: DataStore, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}
