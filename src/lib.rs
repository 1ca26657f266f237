pub mod cli;
pub mod client;
pub mod command;
pub mod executor;
pub mod protocol;
pub mod store;

pub use command::{Command, Fault, Verb};
pub use store::Store;
