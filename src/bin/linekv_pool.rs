use std::error::Error;

use linekv::{
    cli,
    protocol::{DEFAULT_POOL_SIZE, Policy},
};

fn main() -> Result<(), Box<dyn Error>> {
    cli::run(Policy::Pooled {
        workers: DEFAULT_POOL_SIZE,
    })
}
