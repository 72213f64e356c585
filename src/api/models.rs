use serde::{Deserialize, Serialize};

use crate::projection::CatalogEntry;

#[derive(Debug, Serialize, Deserialize)]
pub struct ReprojectRequest {
    pub x: f64,
    pub y: f64,
    /// Catalog name or `AUTHORITY:CODE`
    pub crs: String,
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReprojectResponse {
    pub x: f64,
    pub y: f64,
    pub crs: String,
    pub target: String,
    pub latitude: f64,
    pub longitude: f64,
    pub execution_time_ms: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub entries: Vec<CatalogEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
