//! HTTP API
//!
//! The messaging-platform webhook plus read-only audit views.

mod handlers;
mod twiml;
mod types;

pub use handlers::create_router;

use crate::db::Database;
use crate::runtime::{DatabaseStorage, ProductionEngine};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ProductionEngine>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            engine: Arc::new(ProductionEngine::new(DatabaseStorage::new(db))),
        }
    }

    pub fn db(&self) -> &Database {
        self.engine.store().inner()
    }
}
