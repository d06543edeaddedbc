use std::path::Path;
use crate::errors::ReporterError;
use super::types::ReporterConfig;
use super::security::validate_security_patterns;
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

pub async fn parse_config(path: &Path) -> Result<ReporterConfig, ReporterError> {
    if !path.exists() {
        return Err(ReporterError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(ReporterError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> Result<ReporterConfig, ReporterError> {
    // An empty file is a valid all-defaults config
    if content.trim().is_empty() {
        return Ok(ReporterConfig::default());
    }

    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    validate_security_patterns(&yaml)?;
    validate_schema(&yaml)?;

    let config: ReporterConfig = serde_yaml::from_value(yaml)?;

    validate_conflicts(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), ReporterError> {
    let json_str = serde_json::to_string(yaml)
        .map_err(|e| ReporterError::Config(format!("Config conversion error: {}", e)))?;
    let json_value: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| ReporterError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| ReporterError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only; typed deserialization below is the hard gate
        for e in errors {
            let msg = format!("{} at {}", e, e.instance_path);
            warn!(validation_error = %msg, "Config schema warning");
        }
    }

    Ok(())
}

/// Detect settings that parse fine but cannot produce a working run.
fn validate_conflicts(config: &ReporterConfig) -> Result<(), ReporterError> {
    if let Some(bz) = &config.bugzilla {
        check_http_url("bugzilla.base_url", &bz.base_url)?;
        if bz.timeout_secs == Some(0) {
            return Err(ReporterError::Config("bugzilla.timeout_secs must be positive".into()));
        }
    }

    if let Some(slack) = &config.slack {
        let has_token = slack.token.as_ref().map_or(false, |t| !t.is_empty());
        let has_channel = slack.channel.as_ref().map_or(false, |c| !c.is_empty());

        if let Some(webhook) = &slack.webhook_url {
            check_http_url("slack.webhook_url", webhook)?;
            if has_token {
                return Err(ReporterError::Config(
                    "slack.token and slack.webhook_url are mutually exclusive".into(),
                ));
            }
        } else if has_token && !has_channel {
            return Err(ReporterError::Config(
                "slack.token requires slack.channel".into(),
            ));
        } else if !has_channel {
            // Webhook or channel may still arrive from the environment at run time
            warn!("Slack section present but neither channel nor webhook_url configured");
        }

        if let Some(api_url) = &slack.api_url {
            check_http_url("slack.api_url", api_url)?;
        }
        if slack.timeout_secs == Some(0) {
            return Err(ReporterError::Config("slack.timeout_secs must be positive".into()));
        }
    }

    if config.interval_secs() == 0 {
        return Err(ReporterError::Config("schedule.interval_secs must be positive".into()));
    }

    Ok(())
}

fn check_http_url(field: &str, url: &str) -> Result<(), ReporterError> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(ReporterError::Config(format!("{} must be an http(s) URL, got '{}'", field, url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CONFIG: &str = r##"
bugzilla:
  base_url: https://bugzilla.example.com
  timeout_secs: 10
report:
  components: [Networking, Storage]
slack:
  token: xoxb-test
  channel: "#bugs"
schedule:
  interval_secs: 3600
"##;

    #[test]
    fn test_full_config_parses() {
        let config = parse_config_str(FULL_CONFIG).unwrap();
        assert_eq!(config.bugzilla().base_url, "https://bugzilla.example.com");
        assert_eq!(config.report().components.len(), 2);
        assert_eq!(config.interval_secs(), 3600);
    }

    #[test]
    fn test_example_config_is_valid() {
        let config = parse_config_str(include_str!("../../closedbugs.example.yaml")).unwrap();
        assert_eq!(config.report().product, "OpenShift Container Platform");
        assert_eq!(config.interval_secs(), 86_400);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config_str("   \n").unwrap();
        assert!(config.report.is_none());
        assert_eq!(config.report().status, "CLOSED");
    }

    #[test]
    fn test_token_without_channel_rejected() {
        let err = parse_config_str("slack:\n  token: xoxb-test").unwrap_err();
        assert!(matches!(err, ReporterError::Config(_)));
    }

    #[test]
    fn test_token_and_webhook_rejected() {
        let yaml = "slack:\n  token: xoxb-test\n  channel: bugs\n  webhook_url: https://hooks.slack.com/services/x";
        assert!(parse_config_str(yaml).is_err());
    }

    #[test]
    fn test_channel_without_token_accepted() {
        let config = parse_config_str("slack:\n  channel: '#bugs'").unwrap();
        assert!(config.slack.unwrap().token.is_none());
    }

    #[test]
    fn test_webhook_only_accepted() {
        let yaml = "slack:\n  webhook_url: https://hooks.slack.com/services/x";
        assert!(parse_config_str(yaml).is_ok());
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let err = parse_config_str("bugzilla:\n  base_url: ftp://bugzilla.example.com").unwrap_err();
        assert!(err.to_string().contains("bugzilla.base_url"));
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(parse_config_str("schedule:\n  interval_secs: 0").is_err());
    }

    #[test]
    fn test_component_names_pass_through() {
        let config = parse_config_str("report:\n  components: ['Metadata: Storage', 'file:system', 'data:pipeline', '  ']").unwrap();
        let components = config.report().components;
        assert!(components.contains("Metadata: Storage"));
        assert!(components.contains("file:system"));
        assert!(components.contains("data:pipeline"));
        assert!(components.contains("  "));
    }

    #[test]
    fn test_malformed_yaml_is_yaml_error() {
        let err = parse_config_str("report: [unclosed").unwrap_err();
        assert!(matches!(err, ReporterError::Yaml(_)));
    }

    #[tokio::test]
    async fn test_parse_config_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("closedbugs.yaml");
        std::fs::write(&path, FULL_CONFIG).unwrap();
        let config = parse_config(&path).await.unwrap();
        assert_eq!(config.slack.unwrap().channel.as_deref(), Some("#bugs"));
    }

    #[tokio::test]
    async fn test_missing_file_is_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = parse_config(&dir.path().join("absent.yaml")).await.unwrap_err();
        assert!(matches!(err, ReporterError::Config(_)));
    }
}
