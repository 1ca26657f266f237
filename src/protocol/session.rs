use std::{
    io::{Read, Write},
    net::SocketAddr,
};

use log::{debug, trace, warn};

use crate::{
    Command, Fault, Store,
    executor::{self, Step},
};

use super::{ProtocolTransport, Response, transport::TransportError};

/// How a session ended when the transport itself did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `END` was reached and `replies` tokens were flushed.
    Completed { replies: usize },
    /// Decoding failed; the fault marker was sent instead of a body.
    Faulted(Fault),
}

/// Runs one connection's lifecycle: read once, execute commands in order,
/// write one response. The connection is closed when `stream` drops.
pub fn handle_connection<S: Read + Write>(
    stream: S,
    store: &Store,
) -> Result<Outcome, TransportError> {
    let mut transport = ProtocolTransport::new(stream);
    let request = transport.read_request()?;
    trace!("received request: {:?}", request.as_str());

    let mut replies = Vec::new();
    let mut commands = request.commands();

    loop {
        let command = commands
            .next()
            .unwrap_or(Command::Malformed(Fault::MissingEnd));

        match executor::execute(store, command) {
            Step::Reply(token) => replies.push(token),
            Step::Flush => {
                let count = replies.len();
                transport.write_response(&Response::Body(replies))?;
                return Ok(Outcome::Completed { replies: count });
            }
            Step::Abort(fault) => {
                transport.write_response(&Response::Fault(fault.clone()))?;
                return Ok(Outcome::Faulted(fault));
            }
        }
    }
}

/// Runs a session and logs how it ended. Every exit path returns here so
/// callers can release per-session resources unconditionally.
pub fn run_session<S: Read + Write>(stream: S, peer: SocketAddr, store: &Store) {
    match handle_connection(stream, store) {
        Ok(Outcome::Completed { replies }) => {
            debug!("session {peer} completed with {replies} replies")
        }
        Ok(Outcome::Faulted(fault)) => warn!("session {peer} faulted: {fault}"),
        Err(e) => warn!("session {peer} abandoned: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use crate::{Verb, protocol::transport::tests::Duplex};

    use super::*;

    fn session(store: &Store, input: &str) -> (Outcome, String) {
        let mut stream = Duplex::new(input.as_bytes());
        let outcome = handle_connection(&mut stream, store).unwrap();
        (outcome, stream.written().to_string())
    }

    #[test]
    fn write_read_count() {
        let store = Store::new();
        let (outcome, written) = session(&store, "WRITE\nuser\nalice\nREAD\nuser\nCOUNT\nEND\n");

        assert_eq!(outcome, Outcome::Completed { replies: 3 });
        assert_eq!(written, "FIN\nalice\n1\n\n");
    }

    #[test]
    fn read_missing_on_empty_store() {
        let (_, written) = session(&Store::new(), "READ\nmissing\nEND\n");

        assert_eq!(written, "NULL\n\n");
    }

    #[test]
    fn end_with_no_commands() {
        let (outcome, written) = session(&Store::new(), "END\n");

        assert_eq!(outcome, Outcome::Completed { replies: 0 });
        assert_eq!(written, "\n\n");
    }

    #[test]
    fn unknown_verb_sends_only_the_marker() {
        let (outcome, written) = session(&Store::new(), "BOGUS\nEND\n");

        assert_eq!(outcome, Outcome::Faulted(Fault::UnknownVerb("BOGUS".into())));
        assert_eq!(written, "INCP\n");
    }

    #[test]
    fn missing_end_discards_replies() {
        let (outcome, written) = session(&Store::new(), "COUNT\nREAD\nk\n");

        assert_eq!(outcome, Outcome::Faulted(Fault::MissingEnd));
        assert_eq!(written, "INCE\n");
    }

    #[test]
    fn commands_before_fault_are_kept() {
        let store = Store::new();
        let (outcome, written) = session(&store, "WRITE\nk\nv\nDELETE\n");

        assert_eq!(outcome, Outcome::Faulted(Fault::MissingKey(Verb::Delete)));
        assert_eq!(written, "INC3\n");
        assert_eq!(store.read("k"), Some("v".to_string()));
    }

    #[test]
    fn delete_then_read_is_null() {
        let store = Store::new();
        session(&store, "WRITE\nk\nv\nEND\n");
        let (_, written) = session(&store, "DELETE\nk\nREAD\nk\nDELETE\nnever\nEND\n");

        assert_eq!(written, "FIN\nNULL\nNULL\n\n");
    }

    #[test]
    fn repeated_write_does_not_double_count() {
        let (_, written) = session(
            &Store::new(),
            "WRITE\nk\nv\nWRITE\nk\nv\nREAD\nk\nCOUNT\nEND\n",
        );

        assert_eq!(written, "FIN\nFIN\nv\n1\n\n");
    }

    #[test]
    fn peer_closed_before_sending() {
        let mut stream = Duplex::new(b"");
        let err = handle_connection(&mut stream, &Store::new()).unwrap_err();

        assert!(matches!(err, TransportError::Closed));
        assert!(stream.output.is_empty());
    }
}
