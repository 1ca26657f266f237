use std::{
    io,
    sync::{Arc, Mutex, PoisonError},
    thread,
};

use log::{debug, warn};

use crate::Store;

use super::{dispatch::Listener, session::run_session};

/// Fixed set of workers that each accept and serve sessions in turn.
///
/// The listener sits behind a mutex so only one worker is inside `accept`
/// at a time; the session that follows runs without holding it.
#[derive(Debug)]
pub struct WorkerPool {
    workers: Vec<Worker>,
}

impl WorkerPool {
    pub fn new<L: Listener>(size: usize, listener: L, store: Store) -> io::Result<Self> {
        assert!(size > 0);

        let listener = Arc::new(Mutex::new(listener));
        let mut workers = Vec::with_capacity(size);

        for id in 0..size {
            workers.push(Worker::new(id, Arc::clone(&listener), store.clone())?);
        }

        Ok(Self { workers })
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Blocks until every worker has exited.
    pub fn join(mut self) {
        for worker in self.workers.drain(..) {
            if worker.thread.join().is_err() {
                warn!("worker {} panicked", worker.id);
            }
        }
    }
}

#[derive(Debug)]
struct Worker {
    id: usize,
    thread: thread::JoinHandle<()>,
}

impl Worker {
    fn new<L: Listener>(id: usize, listener: Arc<Mutex<L>>, store: Store) -> io::Result<Self> {
        let thread = thread::Builder::new()
            .name(format!("linekv-worker-{id}"))
            .spawn(move || {
                loop {
                    let accepted = listener
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .accept();

                    match accepted {
                        Ok((stream, peer)) => {
                            debug!("worker {id} handling {peer}");
                            run_session(stream, peer, &store);
                        }
                        Err(e) => warn!("worker {id} failed to accept: {e}"),
                    }
                }
            })?;

        Ok(Self { id, thread })
    }
}
