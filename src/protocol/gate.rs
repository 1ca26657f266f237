use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

/// Counting semaphore bounding the number of live sessions.
///
/// [`Gate::acquire`] blocks on a condition variable while the ceiling is
/// reached. The returned [`Permit`] releases its slot when dropped, so a
/// slot is returned exactly once per session on every exit path.
#[derive(Debug)]
pub struct Gate {
    live: Mutex<usize>,
    released: Condvar,
    ceiling: usize,
}

impl Gate {
    pub fn new(ceiling: usize) -> Arc<Self> {
        assert!(ceiling > 0);

        Arc::new(Self {
            live: Mutex::new(0),
            released: Condvar::new(),
            ceiling,
        })
    }

    pub fn acquire(self: &Arc<Self>) -> Permit {
        let mut live = self.lock();
        while *live >= self.ceiling {
            live = self
                .released
                .wait(live)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *live += 1;

        Permit {
            gate: Arc::clone(self),
        }
    }

    /// Sessions currently holding a permit.
    pub fn live(&self) -> usize {
        *self.lock()
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug)]
pub struct Permit {
    gate: Arc<Gate>,
}

impl Drop for Permit {
    fn drop(&mut self) {
        let mut live = self.gate.lock();
        *live -= 1;
        drop(live);
        self.gate.released.notify_one();
    }
}
