//! # Registro de Estadísticas
//! src/metrics/registry.rs
//!
//! Tres contadores de proceso (requests, bytes recibidos, bytes enviados)
//! detrás de un único `Mutex`. Solo se exponen incrementos atómicos y
//! snapshots atómicos; las secciones críticas contienen únicamente la
//! aritmética, nunca I/O.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Registro thread-safe; clonarlo comparte los mismos contadores
#[derive(Clone, Default)]
pub struct StatsRegistry {
    inner: Arc<Mutex<StatsCounters>>,
}

/// Contadores internos
#[derive(Default)]
struct StatsCounters {
    requests_served: u64,
    bytes_received: u64,
    bytes_sent: u64,
}

/// Lectura consistente de los tres contadores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub requests_served: u64,
    pub bytes_received: u64,
    pub bytes_sent: u64,
}

impl StatsRegistry {
    /// Crea un registro con los contadores a cero
    pub fn new() -> Self {
        Self::default()
    }

    /// Cuenta un request y los bytes leídos para él, en una sola operación
    pub fn record_request(&self, bytes_received: u64) {
        let mut counters = self.lock();
        counters.requests_served = counters.requests_served.saturating_add(1);
        counters.bytes_received = counters.bytes_received.saturating_add(bytes_received);
    }

    /// Suma bytes efectivamente transmitidos al contador de enviados
    pub fn record_sent(&self, bytes_sent: u64) {
        let mut counters = self.lock();
        counters.bytes_sent = counters.bytes_sent.saturating_add(bytes_sent);
    }

    /// Obtiene un snapshot de los tres contadores bajo el mismo lock
    pub fn snapshot(&self) -> StatsSnapshot {
        let counters = self.lock();
        StatsSnapshot {
            requests_served: counters.requests_served,
            bytes_received: counters.bytes_received,
            bytes_sent: counters.bytes_sent,
        }
    }

    // Los contadores son enteros planos: un lock envenenado sigue siendo válido.
    fn lock(&self) -> MutexGuard<'_, StatsCounters> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
