//! Line protocol, sessions and connection dispatch.
//!
//! This module holds everything between an accepted TCP connection and the
//! [`Store`](crate::Store): the wire codec, the per-connection session
//! handler, and the policies that schedule sessions onto threads.
//!
//! # Wire Format
//!
//! A request is a single buffer of at most [`BUFFER_SIZE`] bytes holding
//! newline-terminated tokens:
//!
//! ```text
//! WRITE\nuser\nalice\nREAD\nuser\nCOUNT\nEND\n
//! ```
//!
//! The server reads the buffer once, executes commands in order, and answers
//! with one message before closing the connection:
//!
//! - On `END`: every reply token joined by newlines, then a blank line
//!   (`FIN\nalice\n1\n\n` for the request above).
//! - On a fault: only the fault marker and a newline (`INCP\n`). Replies
//!   gathered before the fault are discarded, but their effects on the store
//!   are kept.
//!
//! There is no reassembly across reads and no read or write deadline; a
//! stalled client holds its thread until it disconnects.
//!
//! # Key Components
//!
//! - [`Request`] / [`Commands`]: tokenizer and command decoder.
//! - [`Response`]: reply rendering.
//! - [`ProtocolTransport`]: one read and one write over any `Read + Write`.
//! - [`handle_connection`]: the session lifecycle.
//! - [`Dispatcher`]: [`Unbounded`], [`Bounded`] and [`Pooled`] policies.
//! - [`KvServer`]: binds an address and runs a [`Policy`].
//!
//! # See Also
//!
//! - [`executor`](crate::executor): per-command semantics.
mod dispatch;
mod gate;
mod request;
mod response;
mod server;
mod session;
mod thread;
mod transport;

pub use dispatch::{
    Bounded, DEFAULT_ADMISSION_CEILING, DEFAULT_POOL_SIZE, Dispatcher, Listener, Policy, Pooled,
    Unbounded,
};
pub use gate::{Gate, Permit};
pub use request::{Commands, Request};
pub use response::Response;
pub use server::KvServer;
pub use session::{Outcome, handle_connection, run_session};
pub use thread::WorkerPool;
pub use transport::{BUFFER_SIZE, ProtocolTransport, TransportError};
