//! # Worker de Conexión
//! src/server/connection.rs
//!
//! Atiende una conexión de principio a fin. El stream se recibe por valor,
//! así que se cierra al salir de [`handle_connection`] por cualquier camino.
//!
//! ```text
//! ACCEPTED ─► READ ─► PARSED ─► ROUTED ─► RESPONDED ─► CLOSED
//!               │                                        ▲
//!               └───────── lectura vacía o error ────────┘
//! ```
//!
//! Se hace una única lectura de hasta [`READ_BUFFER_SIZE`] bytes. No se
//! acumulan lecturas parciales: un request cuya primera línea no quepa en
//! ese buffer no está soportado.

use crate::handlers::{calc_handler, static_file_handler, stats_handler, StaticFiles};
use crate::http::{Request, Response, StatusCode};
use crate::metrics::StatsRegistry;
use crate::router::Route;
use std::io::{self, Read, Write};
use std::sync::Arc;
use tracing::debug;

/// Máximo de bytes leídos por conexión
pub const READ_BUFFER_SIZE: usize = 4095;

/// Estado compartido que necesita cada worker
#[derive(Clone)]
pub struct ConnectionContext {
    pub stats: StatsRegistry,
    pub files: Arc<StaticFiles>,
}

impl ConnectionContext {
    pub fn new(stats: StatsRegistry, files: StaticFiles) -> Self {
        Self {
            stats,
            files: Arc::new(files),
        }
    }
}

/// Lee un request, lo cuenta, lo enruta y responde una sola vez
///
/// Los errores de lectura cierran la conexión en silencio. Los errores de
/// escritura se retornan para que el llamador los registre.
pub fn handle_connection<S: Read + Write>(mut stream: S, ctx: &ConnectionContext) -> io::Result<()> {
    let mut buffer = [0u8; READ_BUFFER_SIZE];
    let bytes_read = match stream.read(&mut buffer) {
        Ok(0) => {
            debug!("Conexión cerrada sin datos");
            return Ok(());
        }
        Ok(n) => n,
        Err(e) => {
            debug!(error = %e, "Lectura fallida, cerrando conexión");
            return Ok(());
        }
    };

    // Se cuenta antes de enrutar: también los requests malformados.
    ctx.stats.record_request(bytes_read as u64);

    let request = match Request::parse(&buffer[..bytes_read]) {
        Ok(request) => request,
        Err(e) => {
            debug!(bytes = bytes_read, error = %e, "Request line inválida");
            return respond(&mut stream, Response::new(StatusCode::BadRequest));
        }
    };

    let route = Route::resolve(&request);
    debug!(
        method = request.method().as_str(),
        path = request.path(),
        bytes = bytes_read,
        route = route.name(),
        "Request recibido"
    );

    match route {
        Route::StaticFile(path) => static_file_handler(&mut stream, path, &ctx.files, &ctx.stats),
        Route::Stats => respond(&mut stream, stats_handler(&ctx.stats)),
        Route::Calc(query) => respond(&mut stream, calc_handler(query)),
        Route::NotFound => respond(&mut stream, Response::new(StatusCode::NotFound)),
        Route::MethodNotAllowed => {
            respond(&mut stream, Response::new(StatusCode::MethodNotAllowed))
        }
    }
}

fn respond<W: Write>(stream: &mut W, response: Response) -> io::Result<()> {
    response.with_common_headers().write_to(stream)
}
