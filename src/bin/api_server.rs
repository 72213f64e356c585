use clap::Parser;
use tracing::{error, info};
use tunnelmap::api::create_router;
use tunnelmap::config::{init_logging, ServerConfig};

#[tokio::main]
async fn main() {
    init_logging();

    let config = ServerConfig::parse();

    let state = match config.app_state() {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app = create_router(state, config.max_body_bytes());

    let listener = match tokio::net::TcpListener::bind(config.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", config.bind, e);
            std::process::exit(1);
        }
    };

    info!(bind = %config.bind, "tunnelmap API server listening");
    info!("  GET  /api/crs");
    info!("  GET  /api/reproject?x=<easting>&y=<northing>&crs=<name or code>[&target=<name or code>]");
    info!("  POST /api/survey (application/json survey request)");
    info!("  POST /api/upload (multipart/form-data: csv file + crs [+ alignment, target, kind])");

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
