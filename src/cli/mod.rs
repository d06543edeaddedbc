pub mod commands;
pub mod run;
pub mod schedule;

pub use commands::{Cli, Commands};
