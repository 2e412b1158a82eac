//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Decide qué handler atiende un request. Las reglas se evalúan en este
//! orden fijo y gana la primera que coincide:
//!
//! ```text
//! método != GET        → 405
//! /static/...          → archivos estáticos
//! /stats               → estadísticas
//! /calc?query, /calc   → calculadora
//! cualquier otro path  → 404
//! ```

use crate::http::{Method, Request};

/// Prefijo de los archivos estáticos
pub const STATIC_PREFIX: &str = "/static/";

/// Path exacto del reporte de estadísticas
pub const STATS_PATH: &str = "/stats";

/// Path de la calculadora (sin el `?`)
pub const CALC_PATH: &str = "/calc";

/// Destino de un request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// Archivo estático; lleva el path completo del request
    StaticFile(&'a str),
    Stats,
    /// Calculadora; lleva el texto después de `?`
    Calc(&'a str),
    NotFound,
    MethodNotAllowed,
}

impl<'a> Route<'a> {
    /// Encuentra la ruta para un request
    ///
    /// # Ejemplo
    /// ```
    /// use stats_server::http::Request;
    /// use stats_server::router::Route;
    ///
    /// let request = Request::parse(b"GET /calc?a=1&b=2 HTTP/1.1\r\n\r\n").unwrap();
    /// assert_eq!(Route::resolve(&request), Route::Calc("a=1&b=2"));
    /// ```
    pub fn resolve(request: &'a Request) -> Self {
        if *request.method() != Method::GET {
            return Route::MethodNotAllowed;
        }

        let path = request.path();
        if path.starts_with(STATIC_PREFIX) {
            Route::StaticFile(path)
        } else if path == STATS_PATH {
            Route::Stats
        } else if let Some(query) = path
            .strip_prefix(CALC_PATH)
            .and_then(|rest| rest.strip_prefix('?'))
        {
            Route::Calc(query)
        } else if path == CALC_PATH {
            Route::Calc("")
        } else {
            Route::NotFound
        }
    }

    /// Nombre corto para los logs
    pub fn name(&self) -> &'static str {
        match self {
            Route::StaticFile(_) => "static",
            Route::Stats => "stats",
            Route::Calc(_) => "calc",
            Route::NotFound => "not_found",
            Route::MethodNotAllowed => "method_not_allowed",
        }
    }
}
