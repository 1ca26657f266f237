//! Blocking client for the line protocol.
use std::{
    io::{Read, Write},
    net::{SocketAddr, TcpStream},
};

use crate::protocol::TransportError;

/// Decoded server reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Body(Vec<String>),
    Fault(String),
}

impl Reply {
    /// Parses a complete reply. Bodies end in a blank line; anything else
    /// is a fault marker. An empty body and a body holding a single empty
    /// token are the same on the wire and both parse as an empty body.
    pub fn parse(text: &str) -> Self {
        match text.strip_suffix("\n\n") {
            Some("") => Reply::Body(Vec::new()),
            Some(body) => Reply::Body(body.split('\n').map(str::to_string).collect()),
            None => Reply::Fault(text.trim_end_matches('\n').to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Client {
    address: SocketAddr,
}

impl Client {
    pub fn new(address: SocketAddr) -> Self {
        Self { address }
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    /// Sends `payload` as one request and waits for the server to close.
    pub fn send(&self, payload: &str) -> Result<Reply, TransportError> {
        let mut stream = TcpStream::connect(self.address)?;
        stream.write_all(payload.as_bytes())?;
        stream.flush()?;

        let mut text = String::new();
        stream.read_to_string(&mut text)?;
        if text.is_empty() {
            return Err(TransportError::Closed);
        }

        Ok(Reply::parse(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_body() {
        assert_eq!(
            Reply::parse("FIN\nalice\n1\n\n"),
            Reply::Body(vec!["FIN".into(), "alice".into(), "1".into()])
        );
        assert_eq!(Reply::parse("\n\n"), Reply::Body(Vec::new()));
    }

    #[test]
    fn parse_body_with_empty_tokens() {
        assert_eq!(
            Reply::parse("FIN\n\n\n"),
            Reply::Body(vec!["FIN".into(), String::new()])
        );
    }

    #[test]
    fn parse_fault() {
        assert_eq!(Reply::parse("INCK\n"), Reply::Fault("INCK".into()));
    }
}
