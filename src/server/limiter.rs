//! # Límite de Conexiones
//! src/server/limiter.rs
//!
//! Semáforo de conteo (`Mutex` + `Condvar`) que acota cuántos workers viven
//! a la vez. El aceptador pide un [`Permit`] antes de cada `accept` y lo
//! mueve al thread del worker; al soltarse el permiso se libera el cupo.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

/// Semáforo compartido entre el aceptador y los workers
#[derive(Clone)]
pub struct ConnectionLimiter {
    shared: Arc<Shared>,
}

struct Shared {
    active: Mutex<usize>,
    released: Condvar,
    capacity: usize,
}

/// Cupo de una conexión; se devuelve al hacer drop
pub struct Permit {
    shared: Arc<Shared>,
}

impl ConnectionLimiter {
    /// Crea un limitador con `capacity` cupos (mínimo 1)
    pub fn new(capacity: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                active: Mutex::new(0),
                released: Condvar::new(),
                capacity: capacity.max(1),
            }),
        }
    }

    /// Bloquea hasta que haya un cupo libre
    pub fn acquire(&self) -> Permit {
        let mut active = self.shared.lock();
        while *active >= self.shared.capacity {
            active = self
                .shared
                .released
                .wait(active)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *active += 1;
        self.permit()
    }

    /// Conexiones con permiso vigente (para los logs)
    pub fn active(&self) -> usize {
        *self.shared.lock()
    }

    /// Máximo de conexiones simultáneas
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    fn permit(&self) -> Permit {
        Permit {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, usize> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Permit {
    fn drop(&mut self) {
        let mut active = self.shared.lock();
        *active = active.saturating_sub(1);
        drop(active);
        self.shared.released.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_permits_are_counted() {
        let limiter = ConnectionLimiter::new(2);

        let first = limiter.acquire();
        let second = limiter.acquire();
        assert_eq!(limiter.active(), 2);

        drop(first);
        assert_eq!(limiter.active(), 1);
        let third = limiter.acquire();
        assert_eq!(limiter.active(), 2);

        drop(second);
        drop(third);
        assert_eq!(limiter.active(), 0);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let limiter = ConnectionLimiter::new(0);
        assert_eq!(limiter.capacity(), 1);

        let permit = limiter.acquire();
        assert_eq!(limiter.active(), 1);
        drop(permit);
        assert_eq!(limiter.active(), 0);
    }

    #[test]
    fn test_acquire_blocks_until_release() {
        let limiter = ConnectionLimiter::new(1);
        let held = limiter.acquire();

        let (tx, rx) = mpsc::channel();
        let waiter = {
            let limiter = limiter.clone();
            thread::spawn(move || {
                let _permit = limiter.acquire();
                tx.send(()).unwrap();
            })
        };

        // Sigue bloqueado mientras el permiso exista.
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

        drop(held);
        rx.recv_timeout(Duration::from_secs(5)).unwrap();
        waiter.join().unwrap();
        assert_eq!(limiter.active(), 0);
    }

    #[test]
    fn test_permit_released_from_worker_thread() {
        let limiter = ConnectionLimiter::new(4);
        let permit = limiter.acquire();

        thread::spawn(move || drop(permit)).join().unwrap();

        assert_eq!(limiter.active(), 0);
    }
}
