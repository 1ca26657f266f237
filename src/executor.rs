//! Command execution against the shared [`Store`].
//!
//! [`execute`] interprets one [`Command`] and tells the session what to do
//! next through a [`Step`]. Data commands always produce exactly one reply
//! token; `END` and malformed input end the command loop.
use log::trace;

use crate::{Command, Fault, Store};

/// Reply token for a successful WRITE or DELETE.
pub const SUCCESS: &str = "FIN";
/// Reply token for a missing key.
pub const ABSENT: &str = "NULL";

/// Outcome of executing a single command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Append this token to the session's replies and continue.
    Reply(String),
    /// Render accumulated replies and close.
    Flush,
    /// Discard accumulated replies, send the fault marker and close.
    Abort(Fault),
}

pub fn execute(store: &Store, command: Command) -> Step {
    trace!("executing {command:?}");

    match command {
        Command::Write { key, value } => {
            store.write(key, value);
            Step::Reply(SUCCESS.to_string())
        }
        Command::Read { key } => {
            Step::Reply(store.read(&key).unwrap_or_else(|| ABSENT.to_string()))
        }
        Command::Count => Step::Reply(store.count().to_string()),
        Command::Delete { key } => {
            let token = if store.delete(&key) { SUCCESS } else { ABSENT };
            Step::Reply(token.to_string())
        }
        Command::End => Step::Flush,
        Command::Malformed(fault) => Step::Abort(fault),
    }
}
