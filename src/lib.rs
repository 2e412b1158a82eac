//! # Stats Server
//! src/lib.rs
//!
//! Servidor HTTP concurrente mínimo: acepta conexiones TCP, lee un request
//! por conexión, lo enruta a uno de tres handlers y mantiene contadores de
//! proceso de requests y bytes transferidos.
//!
//! ## Arquitectura
//!
//! ```text
//! Server (accept) ─► handle_connection ─► Route ─┬─► static_file_handler
//!                          │                      ├─► stats_handler
//!                          ▼                      └─► calc_handler
//!                    StatsRegistry ◄──────────────────┘
//! ```
//!
//! - `http`: Request line, responses y status codes
//! - `server`: Aceptador, límite de conexiones y worker por conexión
//! - `router`: Orden fijo de rutas
//! - `handlers`: `/static/`, `/stats` y `/calc`
//! - `metrics`: Registro de estadísticas compartido
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use stats_server::config::Config;
//! use stats_server::server::Server;
//!
//! let mut config = Config::default();
//! config.port = 8080;
//! let server = Server::bind(config).expect("Error al iniciar servidor");
//! server.run();
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod metrics;
pub mod router;
pub mod server;

pub use error::{Result, ServerError};
