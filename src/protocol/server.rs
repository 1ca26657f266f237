use std::net::{SocketAddr, TcpListener};

use log::info;

use crate::Store;

use super::{
    dispatch::{Listener, Policy},
    transport::TransportError,
};

pub struct KvServer {
    address: SocketAddr,
    policy: Policy,
    store: Store,
}

impl KvServer {
    pub fn new(address: SocketAddr, policy: Policy) -> Self {
        Self {
            address,
            policy,
            store: Store::new(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Binds the configured address and serves until a fatal error.
    pub fn listen(self) -> Result<(), TransportError> {
        let listener = TcpListener::bind(self.address)?;
        info!("listening at {} ({})", self.address, self.policy);

        self.serve(listener)
    }

    /// Serves connections from an already bound listener.
    pub fn serve<L: Listener>(self, listener: L) -> Result<(), TransportError> {
        self.policy.dispatch(listener, self.store)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Read, Write},
        net::{Ipv4Addr, TcpStream},
        thread,
    };

    use crate::client::{Client, Reply};

    use super::*;

    const POLICIES: [Policy; 3] = [
        Policy::Unbounded,
        Policy::Bounded { ceiling: 4 },
        Policy::Pooled { workers: 4 },
    ];

    fn start(policy: Policy) -> (Client, Store) {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
        let address = listener.local_addr().unwrap();
        let server = KvServer::new(address, policy);
        let store = server.store().clone();

        thread::spawn(move || server.serve(listener));
        (Client::new(address), store)
    }

    #[test]
    fn example_scenarios() {
        for policy in POLICIES {
            let (client, _) = start(policy);

            assert_eq!(
                client.send("READ\nmissing\nEND\n").unwrap(),
                Reply::Body(vec!["NULL".into()])
            );
            assert_eq!(
                client
                    .send("WRITE\nuser\nalice\nREAD\nuser\nCOUNT\nEND\n")
                    .unwrap(),
                Reply::Body(vec!["FIN".into(), "alice".into(), "1".into()])
            );
            assert_eq!(
                client.send("BOGUS\nEND\n").unwrap(),
                Reply::Fault("INCP".into())
            );
        }
    }

    #[test]
    fn raw_wire_format() {
        let (client, _) = start(Policy::Unbounded);

        let mut stream = TcpStream::connect(client.address()).unwrap();
        stream
            .write_all(b"WRITE\nuser\nalice\nREAD\nuser\nCOUNT\nEND\n")
            .unwrap();
        let mut out = String::new();
        stream.read_to_string(&mut out).unwrap();

        assert_eq!(out, "FIN\nalice\n1\n\n");
    }

    #[test]
    fn state_persists_across_sessions() {
        for policy in POLICIES {
            let (client, store) = start(policy);

            client.send("WRITE\nk\nv\nEND\n").unwrap();
            assert_eq!(
                client.send("READ\nk\nDELETE\nk\nREAD\nk\nEND\n").unwrap(),
                Reply::Body(vec!["v".into(), "FIN".into(), "NULL".into()])
            );
            assert_eq!(store.count(), 0);
        }
    }

    #[test]
    fn missing_terminator_gets_fault_marker() {
        let (client, store) = start(Policy::Pooled { workers: 2 });

        assert_eq!(
            client.send("WRITE\nk\nv\nCOUNT\n").unwrap(),
            Reply::Fault("INCE".into())
        );
        assert_eq!(store.read("k"), Some("v".to_string()));
    }

    #[test]
    fn concurrent_writes_to_one_key() {
        for policy in POLICIES {
            let (client, store) = start(policy);

            let writers: Vec<_> = ["a", "b"]
                .into_iter()
                .map(|value| {
                    let client = client.clone();
                    thread::spawn(move || {
                        for _ in 0..20 {
                            let reply = client.send(&format!("WRITE\nk\n{value}\nCOUNT\nEND\n"));
                            assert_eq!(
                                reply.unwrap(),
                                Reply::Body(vec!["FIN".into(), "1".into()])
                            );
                        }
                    })
                })
                .collect();

            for writer in writers {
                writer.join().unwrap();
            }

            let value = store.read("k").unwrap();
            assert!(value == "a" || value == "b", "{policy}: {value}");
            assert_eq!(store.count(), 1);
        }
    }
}
