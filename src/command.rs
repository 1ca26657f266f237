//! Protocol commands and faults.
//!
//! This module defines the [`Command`] enum, the unit of work decoded from a
//! client request and handed to the [executor](crate::executor). Commands are
//! produced by the [`protocol`](crate::protocol) decoder and consumed exactly
//! once.
//!
//! # Overview
//! A request is a sequence of newline-terminated tokens. Each command starts
//! with a [`Verb`] token followed by its arguments:
//!
//! - `WRITE <key> <value>`: store a value.
//! - `READ <key>`: fetch a value, or `NULL`.
//! - `COUNT`: number of stored keys.
//! - `DELETE <key>`: remove a key.
//! - `END`: flush accumulated replies and close.
//!
//! Anything else becomes [`Command::Malformed`] carrying a [`Fault`], which
//! aborts the session with the fault's [marker](Fault::marker).
//!
//! # Example
//! ```rust
//! use linekv::Verb;
//!
//! let verb: Verb = "READ".parse().unwrap();
//! assert_eq!(verb, Verb::Read);
//!
//! let fault = "read".parse::<Verb>().unwrap_err();
//! assert_eq!(fault.marker(), "INCP");
//! ```
use std::{fmt, str::FromStr};

use thiserror::Error;

/// Protocol faults; each one terminates the offending session only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Fault {
    #[error("unrecognized verb '{0}'")]
    UnknownVerb(String),

    #[error("{0} is missing its key argument")]
    MissingKey(Verb),

    #[error("WRITE is missing its value argument")]
    MissingValue,

    #[error("request ended without END")]
    MissingEnd,
}

impl Fault {
    /// Short literal sent to the client in place of a reply body.
    pub fn marker(&self) -> &'static str {
        match self {
            Fault::UnknownVerb(_) => "INCP",
            Fault::MissingKey(Verb::Read) => "INC2",
            Fault::MissingKey(Verb::Delete) => "INC3",
            Fault::MissingKey(_) => "INCK",
            Fault::MissingValue => "INCV",
            Fault::MissingEnd => "INCE",
        }
    }
}

/// Leading token of every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Write,
    Read,
    Count,
    Delete,
    End,
}

impl FromStr for Verb {
    type Err = Fault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WRITE" => Ok(Verb::Write),
            "READ" => Ok(Verb::Read),
            "COUNT" => Ok(Verb::Count),
            "DELETE" => Ok(Verb::Delete),
            "END" => Ok(Verb::End),
            other => Err(Fault::UnknownVerb(other.to_string())),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verb::Write => "WRITE",
            Verb::Read => "READ",
            Verb::Count => "COUNT",
            Verb::Delete => "DELETE",
            Verb::End => "END",
        };
        f.write_str(name)
    }
}

/// A decoded command, ready for execution against a [`Store`](crate::Store).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert or overwrite `key`.
    Write { key: String, value: String },
    /// Look up `key`.
    Read { key: String },
    /// Report the number of stored keys.
    Count,
    /// Remove `key` if present.
    Delete { key: String },
    /// Render and flush accumulated replies.
    End,
    /// Input that could not be decoded; aborts the session.
    Malformed(Fault),
}

impl Command {
    /// Whether decoding stops after this command.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Command::End | Command::Malformed(_))
    }
}
