use std::io::{self, ErrorKind, Read, Write};

use thiserror::Error;

use super::{Request, Response};

/// Upper bound on the bytes taken from a connection. The whole request must
/// arrive in a single read of at most this size; partial reads are not
/// reassembled.
pub const BUFFER_SIZE: usize = 1024;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport io error: {0}")]
    Io(#[from] io::Error),
    #[error("peer closed the connection before sending a request")]
    Closed,
}

pub struct ProtocolTransport<T: Read + Write> {
    stream: T,
}

impl<T: Read + Write> ProtocolTransport<T> {
    pub fn new(stream: T) -> Self {
        Self { stream }
    }

    /// Performs the session's one read.
    pub fn read_request(&mut self) -> Result<Request, TransportError> {
        let mut buf = [0u8; BUFFER_SIZE];
        let read = loop {
            match self.stream.read(&mut buf) {
                Ok(0) => return Err(TransportError::Closed),
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };

        Ok(Request::from_bytes(&buf[..read]))
    }

    pub fn write_response(&mut self, resp: &Response) -> Result<(), TransportError> {
        self.stream.write_all(resp.encode().as_bytes())?;
        self.stream.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> T {
        self.stream
    }
}
