//! Connection dispatch policies.
//!
//! A [`Dispatcher`] decides how accepted connections are mapped onto
//! threads. All policies share the same contract: a session is served by
//! exactly one thread from accept to close, and the [`Store`] is the only
//! state sessions share.
//!
//! # Policies
//!
//! - [`Unbounded`]: one fresh thread per connection, no limit.
//! - [`Bounded`]: one thread per connection, with a blocking [`Gate`]
//!   admitting at most `ceiling` live sessions. The dispatcher waits for a
//!   free slot before it accepts again.
//! - [`Pooled`]: a fixed [`WorkerPool`] created once; each worker accepts
//!   and serves one session at a time, with accept serialized across
//!   workers.
use std::{
    fmt,
    io::{self, Read, Write},
    net::{SocketAddr, TcpListener, TcpStream},
    sync::Arc,
    thread,
};

use log::{debug, info, warn};

use crate::Store;

use super::{
    gate::{Gate, Permit},
    session::run_session,
    thread::WorkerPool,
    transport::TransportError,
};

pub const DEFAULT_ADMISSION_CEILING: usize = 64;
pub const DEFAULT_POOL_SIZE: usize = 15;

/// Source of accepted connections.
pub trait Listener: Send + 'static {
    type Stream: Read + Write + Send + 'static;

    /// Blocks until a client connects.
    fn accept(&self) -> io::Result<(Self::Stream, SocketAddr)>;
}

impl Listener for TcpListener {
    type Stream = TcpStream;

    fn accept(&self) -> io::Result<(TcpStream, SocketAddr)> {
        TcpListener::accept(self)
    }
}

/// Scheduling policy for sessions.
///
/// `dispatch` only returns on a failure that prevents any further
/// connections from being served; per-connection failures are logged and
/// skipped.
pub trait Dispatcher {
    fn dispatch<L: Listener>(self, listener: L, store: Store) -> Result<(), TransportError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl Dispatcher for Unbounded {
    fn dispatch<L: Listener>(self, listener: L, store: Store) -> Result<(), TransportError> {
        loop {
            match listener.accept() {
                Ok((stream, peer)) => spawn_session(stream, peer, store.clone(), None),
                Err(e) => warn!("failed to accept connection: {e}"),
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bounded {
    gate: Arc<Gate>,
}

impl Bounded {
    pub fn new(ceiling: usize) -> Self {
        Self {
            gate: Gate::new(ceiling),
        }
    }

    pub fn gate(&self) -> Arc<Gate> {
        Arc::clone(&self.gate)
    }
}

impl Dispatcher for Bounded {
    fn dispatch<L: Listener>(self, listener: L, store: Store) -> Result<(), TransportError> {
        loop {
            let permit = self.gate.acquire();
            match listener.accept() {
                Ok((stream, peer)) => spawn_session(stream, peer, store.clone(), Some(permit)),
                Err(e) => warn!("failed to accept connection: {e}"),
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Pooled {
    workers: usize,
}

impl Pooled {
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }
}

impl Dispatcher for Pooled {
    fn dispatch<L: Listener>(self, listener: L, store: Store) -> Result<(), TransportError> {
        let pool = WorkerPool::new(self.workers, listener, store)?;
        info!("started {} workers", pool.size());
        pool.join();
        Ok(())
    }
}

/// Dispatcher selection, as chosen by each server binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Unbounded,
    Bounded { ceiling: usize },
    Pooled { workers: usize },
}

impl Policy {
    pub fn dispatch<L: Listener>(self, listener: L, store: Store) -> Result<(), TransportError> {
        match self {
            Policy::Unbounded => Unbounded.dispatch(listener, store),
            Policy::Bounded { ceiling } => Bounded::new(ceiling).dispatch(listener, store),
            Policy::Pooled { workers } => Pooled::new(workers).dispatch(listener, store),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Unbounded => write!(f, "unbounded thread-per-connection"),
            Policy::Bounded { ceiling } => {
                write!(f, "thread-per-connection, at most {ceiling} sessions")
            }
            Policy::Pooled { workers } => write!(f, "pool of {workers} workers"),
        }
    }
}

// The permit moves into the session thread and is released when that thread
// finishes, or immediately if the thread cannot be spawned.
fn spawn_session<S>(stream: S, peer: SocketAddr, store: Store, permit: Option<Permit>)
where
    S: Read + Write + Send + 'static,
{
    debug!("accepted connection from {peer}");

    let spawned = thread::Builder::new()
        .name("linekv-session".to_string())
        .spawn(move || {
            let _permit = permit;
            run_session(stream, peer, &store);
        });

    if let Err(e) = spawned {
        warn!("failed to spawn session for {peer}: {e}");
    }
}
