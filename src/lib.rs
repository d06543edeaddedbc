pub mod bugzilla;
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod notify;
pub mod reporting;
pub mod utils;
