pub mod types;
pub mod classification;

pub use types::ReporterError;
pub use classification::ErrorClassification;
