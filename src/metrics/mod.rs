//! # Sistema de Métricas
//! src/metrics/mod.rs
//!
//! Contadores de proceso compartidos por todos los workers:
//! - Requests atendidos
//! - Bytes recibidos
//! - Bytes enviados por archivos estáticos

pub mod registry;

pub use registry::{StatsRegistry, StatsSnapshot};
