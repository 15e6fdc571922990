//! Application state for the API server

use crate::{Config, Database};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// This struct is cloned for each request (cheap Arc clone) and carries the
/// store handle explicitly instead of through a global.
#[derive(Clone)]
pub struct AppState {
    /// The record store
    pub db: Arc<Database>,

    /// Configuration (read-only)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(db: Arc<Database>, config: Arc<Config>) -> Self {
        Self { db, config }
    }
}
