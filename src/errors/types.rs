use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bug search failed: {0}")]
    Query(String),

    #[error("Report delivery failed: {0}")]
    Delivery(String),

    #[error("Cancelled: {0}")]
    Cancelled(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
