pub mod client;
pub mod query;

pub use client::{BugTrackerClient, BugzillaClient};
pub use query::{AdvancedQuery, BugQuery};
