use super::types::ReporterError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    /// Short event reason attached to warnings, e.g. "BugSearchFailed".
    pub reason: &'static str,
    pub exit_code: i32,
}

impl ReporterError {
    /// Classify this error into a loggable reason and a process exit code.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            ReporterError::Query(_) => ErrorClassification {
                reason: "BugSearchFailed",
                exit_code: 3,
            },
            ReporterError::Delivery(_) => ErrorClassification {
                reason: "DeliveryFailed",
                exit_code: 4,
            },
            ReporterError::Config(_) | ReporterError::Yaml(_) => ErrorClassification {
                reason: "ConfigInvalid",
                exit_code: 2,
            },
            ReporterError::Cancelled(_) => ErrorClassification {
                reason: "Cancelled",
                exit_code: 130,
            },
            ReporterError::Io(_) => ErrorClassification {
                reason: "IoError",
                exit_code: 1,
            },
            ReporterError::Json(_) => ErrorClassification {
                reason: "JsonError",
                exit_code: 1,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_failure_reason() {
        let err = ReporterError::Query("connection refused".into());
        let class = err.classify();
        assert_eq!(class.reason, "BugSearchFailed");
        assert_eq!(class.exit_code, 3);
    }

    #[test]
    fn test_delivery_failure_reason() {
        let err = ReporterError::Delivery("channel_not_found".into());
        let class = err.classify();
        assert_eq!(class.reason, "DeliveryFailed");
        assert_eq!(class.exit_code, 4);
    }

    #[test]
    fn test_config_and_yaml_share_exit_code() {
        let config = ReporterError::Config("missing channel".into()).classify();
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("a: [").unwrap_err();
        let yaml = ReporterError::from(yaml_err).classify();
        assert_eq!(config.exit_code, 2);
        assert_eq!(yaml.exit_code, config.exit_code);
        assert_eq!(yaml.reason, "ConfigInvalid");
    }

    #[test]
    fn test_cancelled_reason() {
        let err = ReporterError::Cancelled("shutdown".into());
        assert_eq!(err.classify().reason, "Cancelled");
    }

    #[test]
    fn test_display_carries_cause() {
        let err = ReporterError::Query("HTTP 502".into());
        assert_eq!(err.to_string(), "Bug search failed: HTTP 502");
    }
}
