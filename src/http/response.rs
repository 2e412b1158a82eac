//! # Construcción de Respuestas HTTP
//!
//! API para construir respuestas HTTP/1.1 y escribirlas en el socket.
//! Todas las conexiones se cierran después de una sola respuesta, por eso
//! los headers comunes incluyen `Connection: close`.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use stats_server::http::{Response, StatusCode};
//!
//! let response = Response::html("<p>hola</p>").with_common_headers();
//!
//! let bytes = response.to_bytes();
//! assert!(bytes.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! ```

use super::StatusCode;
use std::io::{self, Write};

/// Valor del header `Server`
pub const SERVER_NAME: &str = concat!("stats_server/", env!("CARGO_PKG_VERSION"));

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers en orden de inserción; un nombre repetido se sobrescribe
    headers: Vec<(String, String)>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some((_, existing_value)) => *existing_value = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Establece el cuerpo desde un string y calcula `Content-Length`
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el cuerpo desde bytes y calcula `Content-Length`
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        let len = self.body.len().to_string();
        self.add_header("Content-Length", &len);
        self
    }

    /// Crea una respuesta HTML exitosa (200 OK)
    ///
    /// # Ejemplo
    /// ```
    /// use stats_server::http::Response;
    ///
    /// let response = Response::html("<html></html>");
    /// assert_eq!(response.header("Content-Type"), Some("text/html"));
    /// ```
    pub fn html(body: &str) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", "text/html")
            .with_body(body)
    }

    /// Agrega los headers que llevan todas las respuestas del servidor
    pub fn with_common_headers(self) -> Self {
        self.with_header("Server", SERVER_NAME)
            .with_header("Connection", "close")
    }

    /// Status line y headers, terminados en la línea vacía
    pub fn head_bytes(&self) -> Vec<u8> {
        let mut result = format!("HTTP/1.1 {}\r\n", self.status).into_bytes();

        for (name, value) in &self.headers {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }

        result.extend_from_slice(b"\r\n");
        result
    }

    /// Convierte la respuesta completa a bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = self.head_bytes();
        result.extend_from_slice(&self.body);
        result
    }

    /// Escribe la respuesta completa en `writer` y hace flush
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene un header por nombre (sin distinguir mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Obtiene una referencia a los headers
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
