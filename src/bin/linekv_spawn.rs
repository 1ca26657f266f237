use std::error::Error;

use linekv::{cli, protocol::Policy};

fn main() -> Result<(), Box<dyn Error>> {
    cli::run(Policy::Unbounded)
}
