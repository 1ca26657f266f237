use std::error::Error;

use linekv::{
    cli,
    protocol::{DEFAULT_ADMISSION_CEILING, Policy},
};

fn main() -> Result<(), Box<dyn Error>> {
    cli::run(Policy::Bounded {
        ceiling: DEFAULT_ADMISSION_CEILING,
    })
}
