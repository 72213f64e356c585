//! HTTP API over the survey core

pub mod handlers;
pub mod models;
pub mod routes;

use std::sync::Arc;

use crate::projection::{CrsCatalog, CrsRegistry};

pub use self::routes::create_router;

/// State shared by all request handlers
#[derive(Clone, Default)]
pub struct AppState {
    pub catalog: Arc<CrsCatalog>,
    pub registry: CrsRegistry,
}
