//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración por línea de comandos. No se leen variables de entorno
//! (salvo `RUST_LOG`, que filtra los logs).
//!
//! ## Ejemplo
//!
//! ```bash
//! ./stats_server -p 8080 --root ./public --max-connections 256
//! ```

use crate::error::{Result, ServerError};
use clap::Parser;
use std::time::Duration;
use tracing::info;

/// Configuración del servidor HTTP
#[derive(Debug, Clone, Parser)]
#[command(name = "stats_server")]
#[command(about = "Servidor HTTP concurrente mínimo: /static, /stats y /calc")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "80")]
    pub port: u16,

    /// Host/IP en el que escucha (por defecto todas las interfaces)
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Raíz del servidor; `/static/x` se sirve desde `<root>/static/x`
    #[arg(long, default_value = ".")]
    pub root: String,

    // === Límites ===

    /// Máximo de conexiones atendidas simultáneamente
    #[arg(long = "max-connections", default_value = "1024")]
    pub max_connections: usize,

    /// Timeout de lectura por conexión en milisegundos (0 = sin timeout)
    #[arg(long = "read-timeout-ms", default_value = "30000")]
    pub read_timeout_ms: u64,

    /// Timeout de escritura por conexión en milisegundos (0 = sin timeout)
    #[arg(long = "write-timeout-ms", default_value = "30000")]
    pub write_timeout_ms: u64,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use stats_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:80");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Timeout de lectura, `None` si está deshabilitado
    pub fn read_timeout(&self) -> Option<Duration> {
        millis_to_timeout(self.read_timeout_ms)
    }

    /// Timeout de escritura, `None` si está deshabilitado
    pub fn write_timeout(&self) -> Option<Duration> {
        millis_to_timeout(self.write_timeout_ms)
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<()> {
        if self.max_connections == 0 {
            return Err(ServerError::Config(
                "max connections must be >= 1".to_string(),
            ));
        }
        if self.root.trim().is_empty() {
            return Err(ServerError::Config("server root must not be empty".to_string()));
        }
        Ok(())
    }

    /// Registra un resumen de la configuración en el log
    pub fn log_summary(&self) {
        info!(address = %self.address(), root = %self.root, "Configuración de red");
        info!(
            max_connections = self.max_connections,
            read_timeout_ms = self.read_timeout_ms,
            write_timeout_ms = self.write_timeout_ms,
            "Límites por conexión"
        );
    }
}

fn millis_to_timeout(ms: u64) -> Option<Duration> {
    if ms == 0 {
        None
    } else {
        Some(Duration::from_millis(ms))
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 80,
            host: "0.0.0.0".to_string(),
            root: ".".to_string(),
            max_connections: 1024,
            read_timeout_ms: 30_000,
            write_timeout_ms: 30_000,
        }
    }
}
