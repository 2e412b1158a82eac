//! # Stats Server - Entry Point
//! src/main.rs
//!
//! Parsea la CLI, instala el logging y arranca el loop de aceptación.
//! Los errores de arranque terminan el proceso con código 1.

use stats_server::config::Config;
use stats_server::server::Server;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let config = Config::new();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Stats Server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "Error fatal");
            std::process::exit(1);
        }
    };

    server.run();
}
