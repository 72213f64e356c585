//! Server configuration and logging setup

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::error::Result;
use crate::projection::{CrsCatalog, CrsRegistry};

/// Configuration of the HTTP API server
#[derive(Debug, Clone, Parser)]
#[command(name = "api-server", about = "HTTP API for borehole and tunnel alignment surveys")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "TUNNELMAP_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// JSON file with the coordinate system catalog; built-in catalog if absent
    #[arg(long, env = "TUNNELMAP_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Request body limit in megabytes
    #[arg(long, env = "TUNNELMAP_MAX_UPLOAD_MB", default_value_t = 100)]
    pub max_upload_mb: usize,

    /// Number of resolved reference systems to keep
    #[arg(long, env = "TUNNELMAP_REGISTRY_SIZE", default_value_t = 64)]
    pub registry_size: usize,
}

impl ServerConfig {
    /// Loads the configured catalog, or the built-in one
    pub fn load_catalog(&self) -> Result<CrsCatalog> {
        match &self.catalog {
            Some(path) => {
                let catalog = CrsCatalog::load(path)?;
                info!(path = %path.display(), entries = catalog.len(), "loaded catalog");
                Ok(catalog)
            }
            None => Ok(CrsCatalog::default()),
        }
    }

    /// Body limit in bytes
    pub fn max_body_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    /// Builds the shared state for the request handlers
    pub fn app_state(&self) -> Result<AppState> {
        Ok(AppState {
            catalog: Arc::new(self.load_catalog()?),
            registry: CrsRegistry::new(self.registry_size),
        })
    }
}

/// Installs the fmt subscriber, filtered by `RUST_LOG` (default `info`)
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["api-server"]).unwrap();

        assert_eq!(config.bind, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.max_body_bytes(), 100 * 1024 * 1024);
        assert_eq!(config.registry_size, 64);
        assert_eq!(config.load_catalog().unwrap(), CrsCatalog::default());
    }

    #[test]
    fn test_flags() {
        let config = ServerConfig::try_parse_from([
            "api-server",
            "--bind",
            "127.0.0.1:8080",
            "--max-upload-mb",
            "5",
            "--registry-size",
            "3",
        ])
        .unwrap();

        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.max_body_bytes(), 5 * 1024 * 1024);

        let state = config.app_state().unwrap();
        assert_eq!(state.registry.stats().max_entries, 3);
    }

    #[test]
    fn test_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "Site grid", "code": "EPSG:25833"}}]"#).unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let config = ServerConfig::try_parse_from(["api-server", "--catalog", &path]).unwrap();

        let catalog = config.load_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.lookup("Site grid").is_some());
    }

    #[test]
    fn test_invalid_bind() {
        assert!(ServerConfig::try_parse_from(["api-server", "--bind", "nowhere"]).is_err());
    }
}
