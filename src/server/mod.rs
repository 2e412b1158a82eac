//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes (con un límite de workers vivos)
//! 3. Lanza un thread por conexión
//! 4. Lee, enruta y responde un único request por conexión

pub mod connection;
pub mod limiter;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use connection::{handle_connection, ConnectionContext};
pub use limiter::ConnectionLimiter;
pub use tcp::Server;
