//! # Errores del Servidor
//! src/error.rs
//!
//! Errores fatales del proceso (bind, configuración, raíz inexistente).
//! Los errores de cada conexión nunca salen del worker que la atiende.

use std::path::PathBuf;
use thiserror::Error;

/// Error principal del servidor
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid server root {}: {source}", .path.display())]
    RootDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Alias de `Result` para el servidor
pub type Result<T> = std::result::Result<T, ServerError>;
