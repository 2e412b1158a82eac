//! # Archivos Estáticos
//! src/handlers/static_files.rs
//!
//! Handler para `/static/<ruta>`. El path de la URL se interpreta relativo a
//! la raíz del servidor (`/static/a.txt` → `<root>/static/a.txt`).
//!
//! Antes de abrir nada se canonicaliza el destino y se exige que quede
//! dentro de `<root>/static`; cualquier otro resultado (`..`, symlinks hacia
//! fuera) responde 404. No hay caché: cada request vuelve a resolver y a leer
//! el archivo.
//!
//! El body se envía en bloques de [`CHUNK_SIZE`] bytes y al final se suman a
//! `bytes_sent` solo los bytes que el socket aceptó realmente.

use crate::error::{Result, ServerError};
use crate::http::{Response, StatusCode};
use crate::metrics::StatsRegistry;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Tamaño de cada bloque enviado al socket
pub const CHUNK_SIZE: usize = 4096;

/// Subdirectorio de la raíz expuesto por `/static/`
pub const STATIC_DIR: &str = "static";

/// Motivos por los que un path no se puede servir
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("file not found: {0}")]
    NotFound(#[source] io::Error),

    #[error("path escapes the static directory: {}", .0.display())]
    OutsideRoot(PathBuf),

    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
}

/// Raíz canonicalizada desde la que se sirven archivos
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    /// Canonicaliza la raíz; falla si no existe
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let root = root.canonicalize().map_err(|source| ServerError::RootDir {
            path: root.to_path_buf(),
            source,
        })?;
        Ok(Self { root })
    }

    /// Raíz canonicalizada
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Convierte el path del request en un archivo dentro de `<root>/static`
    pub fn resolve(&self, request_path: &str) -> std::result::Result<PathBuf, ResolveError> {
        let relative = request_path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_start_matches('/');

        let static_dir = self
            .root
            .join(STATIC_DIR)
            .canonicalize()
            .map_err(ResolveError::NotFound)?;
        let target = self
            .root
            .join(relative)
            .canonicalize()
            .map_err(ResolveError::NotFound)?;

        if !target.starts_with(&static_dir) {
            return Err(ResolveError::OutsideRoot(target));
        }
        if !target.is_file() {
            return Err(ResolveError::NotAFile(target));
        }

        Ok(target)
    }
}

/// Handler para `/static/...`
///
/// Escribe directamente en el stream: 404 vacío si no se puede servir, o
/// `200 OK` con `Content-Length` seguido del contenido.
pub fn static_file_handler<W: Write>(
    stream: &mut W,
    request_path: &str,
    files: &StaticFiles,
    stats: &StatsRegistry,
) -> io::Result<()> {
    let path = match files.resolve(request_path) {
        Ok(path) => path,
        Err(e @ ResolveError::OutsideRoot(_)) => {
            warn!(path = request_path, error = %e, "Path traversal rechazado");
            return not_found(stream);
        }
        Err(e) => {
            debug!(path = request_path, error = %e, "Archivo no disponible");
            return not_found(stream);
        }
    };

    let (file, size) = match File::open(&path).and_then(|file| {
        let size = file.metadata()?.len();
        Ok((file, size))
    }) {
        Ok(opened) => opened,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "No se pudo abrir el archivo");
            return not_found(stream);
        }
    };

    let head = Response::new(StatusCode::Ok)
        .with_header("Content-Length", &size.to_string())
        .with_common_headers()
        .head_bytes();
    stream.write_all(&head)?;

    // Nunca más de lo anunciado en Content-Length, aunque el archivo crezca.
    let mut sent = 0u64;
    let result = send_body(file.take(size), stream, &mut sent);
    stats.record_sent(sent);

    debug!(path = %path.display(), size, sent, "Archivo enviado");
    result
}

fn not_found<W: Write>(stream: &mut W) -> io::Result<()> {
    Response::new(StatusCode::NotFound)
        .with_common_headers()
        .write_to(stream)
}

/// Copia `reader` en `writer` por bloques, contando cada byte aceptado
fn send_body<R: Read, W: Write>(mut reader: R, writer: &mut W, sent: &mut u64) -> io::Result<()> {
    let mut chunk = [0u8; CHUNK_SIZE];

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        let mut written = 0;
        while written < n {
            match writer.write(&chunk[written..n]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "connection stopped accepting bytes",
                    ))
                }
                Ok(k) => {
                    written += k;
                    *sent += k as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

    /// Crea `<tmp>/<único>/static` y devuelve la raíz
    fn temp_root() -> PathBuf {
        let id = NEXT_DIR.fetch_add(1, Ordering::SeqCst);
        let root = std::env::temp_dir().join(format!(
            "stats_server_static_{}_{}",
            std::process::id(),
            id
        ));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join(STATIC_DIR)).unwrap();
        root
    }

    fn split_response(raw: &[u8]) -> (String, Vec<u8>) {
        let pos = raw
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("missing header terminator");
        (
            String::from_utf8(raw[..pos + 4].to_vec()).unwrap(),
            raw[pos + 4..].to_vec(),
        )
    }

    /// Writer que acepta como máximo `limit` bytes y luego falla
    struct FailingWriter {
        accepted: Vec<u8>,
        limit: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let room = self.limit - self.accepted.len();
            if room == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer gone"));
            }
            let n = room.min(buf.len());
            self.accepted.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let missing = std::env::temp_dir().join("stats_server_does_not_exist_xyz");
        assert!(matches!(
            StaticFiles::new(&missing),
            Err(ServerError::RootDir { .. })
        ));
    }

    #[test]
    fn test_serves_file_byte_for_byte() {
        let root = temp_root();
        let content: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        fs::write(root.join("static/data.bin"), &content).unwrap();

        let files = StaticFiles::new(&root).unwrap();
        let stats = StatsRegistry::new();
        let mut out = Vec::new();

        static_file_handler(&mut out, "/static/data.bin", &files, &stats).unwrap();

        let (head, body) = split_response(&out);
        assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(head.contains("Content-Length: 10000\r\n"));
        assert_eq!(body, content);
        assert_eq!(stats.snapshot().bytes_sent, 10_000);
    }

    #[test]
    fn test_empty_file() {
        let root = temp_root();
        fs::write(root.join("static/empty.txt"), b"").unwrap();

        let files = StaticFiles::new(&root).unwrap();
        let stats = StatsRegistry::new();
        let mut out = Vec::new();

        static_file_handler(&mut out, "/static/empty.txt", &files, &stats).unwrap();

        let (head, body) = split_response(&out);
        assert!(head.contains("Content-Length: 0\r\n"));
        assert!(body.is_empty());
        assert_eq!(stats.snapshot().bytes_sent, 0);
    }

    #[test]
    fn test_query_suffix_is_ignored() {
        let root = temp_root();
        fs::write(root.join("static/a.txt"), b"hola").unwrap();

        let files = StaticFiles::new(&root).unwrap();
        assert!(files.resolve("/static/a.txt?v=2").is_ok());
    }

    #[test]
    fn test_missing_file_is_404() {
        let root = temp_root();
        let files = StaticFiles::new(&root).unwrap();
        let stats = StatsRegistry::new();
        let mut out = Vec::new();

        static_file_handler(&mut out, "/static/nope.txt", &files, &stats).unwrap();

        let (head, body) = split_response(&out);
        assert!(head.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(body.is_empty());
        assert_eq!(stats.snapshot().bytes_sent, 0);
    }

    #[test]
    fn test_traversal_outside_static_dir_is_rejected() {
        let root = temp_root();
        fs::write(root.join("secret.txt"), b"top secret").unwrap();

        let files = StaticFiles::new(&root).unwrap();
        assert!(matches!(
            files.resolve("/static/../secret.txt"),
            Err(ResolveError::OutsideRoot(_))
        ));

        let stats = StatsRegistry::new();
        let mut out = Vec::new();
        static_file_handler(&mut out, "/static/../secret.txt", &files, &stats).unwrap();
        let (head, body) = split_response(&out);
        assert!(head.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(body.is_empty());
    }

    #[test]
    fn test_directory_is_not_served() {
        let root = temp_root();
        fs::create_dir_all(root.join("static/sub")).unwrap();

        let files = StaticFiles::new(&root).unwrap();
        assert!(matches!(
            files.resolve("/static/sub"),
            Err(ResolveError::NotAFile(_))
        ));
    }

    #[test]
    fn test_partial_send_counts_only_transmitted_bytes() {
        let root = temp_root();
        fs::write(root.join("static/big.bin"), vec![7u8; 3 * CHUNK_SIZE]).unwrap();

        let files = StaticFiles::new(&root).unwrap();
        let stats = StatsRegistry::new();

        // Cabe el header completo y 5000 bytes del body.
        let head_len = Response::new(StatusCode::Ok)
            .with_header("Content-Length", &(3 * CHUNK_SIZE).to_string())
            .with_common_headers()
            .head_bytes()
            .len();
        let mut out = FailingWriter {
            accepted: Vec::new(),
            limit: head_len + 5000,
        };

        let result = static_file_handler(&mut out, "/static/big.bin", &files, &stats);

        assert!(result.is_err());
        assert_eq!(stats.snapshot().bytes_sent, 5000);
    }
}
