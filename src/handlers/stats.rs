//! # Reporte de Estadísticas
//! src/handlers/stats.rs
//!
//! Handler para `/stats`. Toma un único snapshot del registro (el lock se
//! libera antes de formatear) y lo devuelve como página HTML.

use crate::http::Response;
use crate::metrics::{StatsRegistry, StatsSnapshot};

/// Handler para `/stats`
pub fn stats_handler(stats: &StatsRegistry) -> Response {
    render(&stats.snapshot())
}

/// Formatea un snapshot: requests, bytes recibidos, bytes enviados
pub fn render(snapshot: &StatsSnapshot) -> Response {
    let body = format!(
        "<html><body>\
         <h1>Server Statistics</h1>\
         <p>Requests received: {}</p>\
         <p>Total bytes received: {}</p>\
         <p>Total bytes sent: {}</p>\
         </body></html>",
        snapshot.requests_served, snapshot.bytes_received, snapshot.bytes_sent
    );

    Response::html(&body)
}
