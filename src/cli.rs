//! Command-line bootstrap shared by the server binaries.
//!
//! Each server binary fixes its [`Policy`] and takes a single positional
//! port. Logging goes through `env_logger` and is controlled by `RUST_LOG`.
use std::{
    error::Error,
    net::{Ipv4Addr, SocketAddr},
};

use clap::Parser;
use log::info;

use crate::protocol::{KvServer, Policy};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Port to listen on (1025-65535)
    #[arg(value_parser = clap::value_parser!(u16).range(1025..=65535))]
    pub port: u16,
}

impl Cli {
    /// Listen address on all IPv4 interfaces.
    pub fn address(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

/// Parses arguments and serves with `policy` until a fatal error.
pub fn run(policy: Policy) -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();

    ctrlc::set_handler(|| {
        info!("interrupted, shutting down");
        std::process::exit(0);
    })?;

    KvServer::new(cli.address(), policy).listen()?;
    Ok(())
}
