//! # Parsing de la Request Line
//! src/http/request.rs
//!
//! Solo se interpreta la primera línea del request. Headers y body se
//! ignoran por completo.
//!
//! ```text
//! GET /calc?a=3&b=4 HTTP/1.1\r\n
//! (resto ignorado)
//! ```
//!
//! Se exigen al menos tres tokens separados por espacios en blanco y cada
//! token tiene una longitud máxima. Los tokens sobrantes se descartan.

use thiserror::Error;

/// Longitud máxima (bytes) del método; buffer de 16 con terminador
pub const MAX_METHOD_LEN: usize = 15;

/// Longitud máxima (bytes) del path, incluyendo la query; buffer de 256
pub const MAX_PATH_LEN: usize = 255;

/// Longitud máxima (bytes) de la versión del protocolo; buffer de 16
pub const MAX_VERSION_LEN: usize = 15;

/// Método HTTP del request
///
/// Solo `GET` tiene ruta; el resto se conserva tal cual para el log y
/// termina en 405.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    GET,
    Other(String),
}

impl Method {
    fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::GET,
            other => Method::Other(other.to_string()),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::Other(token) => token.as_str(),
        }
    }
}

/// Campo de la request line (para reportar errores)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Method,
    Path,
    Version,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Method => "method",
            Field::Path => "path",
            Field::Version => "version",
        };
        f.write_str(name)
    }
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Empty request")]
    EmptyRequest,

    #[error("Request line is not valid UTF-8")]
    InvalidEncoding,

    #[error("Request line has {found} token(s), expected 3")]
    MissingTokens { found: usize },

    #[error("Request {field} is {len} bytes, max is {max}")]
    TokenTooLong { field: Field, len: usize, max: usize },
}

/// Request line parseada
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    path: String,
    version: String,
}

impl Request {
    /// Parsea la primera línea del buffer recibido
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use stats_server::http::Request;
    ///
    /// let request = Request::parse(b"GET /stats HTTP/1.1\r\nHost: x\r\n\r\n").unwrap();
    /// assert_eq!(request.path(), "/stats");
    /// assert_eq!(request.version(), "HTTP/1.1");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let line_end = buffer
            .iter()
            .position(|&b| b == b'\n')
            .unwrap_or(buffer.len());
        let line = std::str::from_utf8(&buffer[..line_end])
            .map_err(|_| ParseError::InvalidEncoding)?;

        let mut tokens = line.split_ascii_whitespace();
        let (method, path, version) = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(m), Some(p), Some(v)) => (m, p, v),
            (None, _, _) => return Err(ParseError::EmptyRequest),
            (Some(_), None, _) => return Err(ParseError::MissingTokens { found: 1 }),
            (Some(_), Some(_), None) => return Err(ParseError::MissingTokens { found: 2 }),
        };

        check_len(Field::Method, method, MAX_METHOD_LEN)?;
        check_len(Field::Path, path, MAX_PATH_LEN)?;
        check_len(Field::Version, version, MAX_VERSION_LEN)?;

        Ok(Request {
            method: Method::from_token(method),
            path: path.to_string(),
            version: version.to_string(),
        })
    }

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Obtiene el path del request (con la query, si la hay)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la versión HTTP tal como llegó
    pub fn version(&self) -> &str {
        &self.version
    }
}

fn check_len(field: Field, token: &str, max: usize) -> Result<(), ParseError> {
    if token.len() > max {
        return Err(ParseError::TokenTooLong {
            field,
            len: token.len(),
            max,
        });
    }
    Ok(())
}
