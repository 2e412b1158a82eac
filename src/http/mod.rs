//! # Módulo HTTP
//!
//! Lo mínimo del protocolo HTTP/1.x que necesita el servidor:
//!
//! - Parsing de la request line (headers y body se ignoran)
//! - Construcción de responses HTTP/1.1
//! - Status codes
//!
//! No hay keep-alive ni chunked transfer: cada conexión recibe exactamente
//! una respuesta y se cierra.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /calc?a=3&b=4 HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 73\r\n
//! Connection: close\r\n
//! \r\n
//! <html>...</html>
//! ```

pub mod request;   // Parsing de la request line
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
