//! # Handlers del Servidor
//!
//! Los tres endpoints que sirve el servidor:
//!
//! - **static_files**: `/static/<ruta>`, envía archivos por streaming
//! - **stats**: `/stats`, snapshot de los contadores en HTML
//! - **calc**: `/calc?a=N&b=M`, suma de dos enteros en HTML
//!
//! `stats` y `calc` retornan una [`Response`](crate::http::Response);
//! `static_files` escribe directamente en el stream.

pub mod calc;
pub mod static_files;
pub mod stats;

// Re-exportar funciones útiles
pub use calc::calc_handler;
pub use static_files::{static_file_handler, StaticFiles};
pub use stats::stats_handler;
