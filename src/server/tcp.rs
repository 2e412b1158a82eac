//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Aceptador del servidor: un thread por conexión, sin join. Antes de cada
//! `accept` se toma un cupo del [`ConnectionLimiter`], así que nunca hay
//! más de `max_connections` workers vivos; el resto espera en el backlog
//! del socket.

use crate::config::Config;
use crate::error::{Result, ServerError};
use crate::handlers::StaticFiles;
use crate::metrics::StatsRegistry;
use crate::server::connection::{handle_connection, ConnectionContext};
use crate::server::limiter::{ConnectionLimiter, Permit};
use socket2::{Domain, Socket, Type};
use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::thread;
use tracing::{debug, error, info, warn};

/// Conexiones pendientes que el kernel encola antes del `accept`
pub const LISTEN_BACKLOG: i32 = 10;

/// Servidor HTTP concurrente con estadísticas
pub struct Server {
    config: Config,
    listener: TcpListener,
    context: ConnectionContext,
    limiter: ConnectionLimiter,
}

impl Server {
    /// Valida la configuración, resuelve la raíz y hace bind del socket
    ///
    /// Cualquier error aquí es fatal para el proceso.
    pub fn bind(config: Config) -> Result<Self> {
        config.validate()?;
        let files = StaticFiles::new(&config.root)?;

        let address = config.address();
        let listener = listen(&address).map_err(|source| ServerError::Bind {
            addr: address.clone(),
            source,
        })?;

        info!(
            address = %address,
            backlog = LISTEN_BACKLOG,
            root = %files.root().display(),
            "Servidor escuchando"
        );

        Ok(Self {
            limiter: ConnectionLimiter::new(config.max_connections),
            context: ConnectionContext::new(StatsRegistry::new(), files),
            listener,
            config,
        })
    }

    /// Dirección real del socket (útil con puerto 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Handle al registro de estadísticas del servidor
    pub fn stats(&self) -> StatsRegistry {
        self.context.stats.clone()
    }

    /// Loop de aceptación; nunca retorna
    pub fn run(&self) {
        info!(
            max_connections = self.limiter.capacity(),
            "Modo concurrente: un thread por conexión"
        );

        loop {
            let permit = self.limiter.acquire();
            match self.listener.accept() {
                Ok((stream, peer)) => self.spawn_worker(stream, peer, permit),
                Err(e) => warn!(error = %e, "Error al aceptar conexión"),
            }
        }
    }

    fn spawn_worker(&self, stream: TcpStream, peer: SocketAddr, permit: Permit) {
        let timeouts = stream
            .set_read_timeout(self.config.read_timeout())
            .and_then(|()| stream.set_write_timeout(self.config.write_timeout()));
        if let Err(e) = timeouts {
            warn!(peer = %peer, error = %e, "No se pudieron configurar los timeouts");
            return;
        }

        debug!(peer = %peer, active = self.limiter.active(), "Conexión aceptada");

        let context = self.context.clone();
        let spawned = thread::Builder::new()
            .name(format!("conn-{}", peer))
            .spawn(move || {
                let _permit = permit;
                if let Err(e) = handle_connection(stream, &context) {
                    debug!(peer = %peer, error = %e, "Error en la conexión");
                }
            });

        if let Err(e) = spawned {
            error!(peer = %peer, error = %e, "No se pudo crear el thread del worker");
        }
    }
}

/// Crea el socket de escucha con `SO_REUSEADDR` y `LISTEN_BACKLOG`
fn listen(address: &str) -> io::Result<TcpListener> {
    let addr = address.to_socket_addrs()?.next().ok_or_else(|| {
        io::Error::new(io::ErrorKind::AddrNotAvailable, "address did not resolve")
    })?;

    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, None)?;
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(LISTEN_BACKLOG)?;

    Ok(TcpListener::from(socket))
}
