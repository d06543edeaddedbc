pub mod bug;

pub use bug::*;
