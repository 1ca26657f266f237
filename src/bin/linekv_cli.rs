use std::{
    error::Error,
    io::{self, Read},
    net::SocketAddr,
    process::ExitCode,
};

use clap::Parser;
use linekv::client::{Client, Reply};

#[derive(Debug, Parser)]
#[command(version, about = "Send stdin to a linekv server as one request")]
struct Cli {
    /// Server address, e.g. 127.0.0.1:4000
    address: SocketAddr,
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let mut payload = String::new();
    io::stdin().read_to_string(&mut payload)?;

    match Client::new(cli.address).send(&payload)? {
        Reply::Body(tokens) => {
            for token in tokens {
                println!("{token}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Reply::Fault(marker) => {
            eprintln!("server fault: {marker}");
            Ok(ExitCode::FAILURE)
        }
    }
}
