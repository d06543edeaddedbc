use crate::errors::ReporterError;

/// Config fields that are used as request URLs.
const URL_FIELDS: &[&str] = &["bugzilla.base_url", "slack.webhook_url", "slack.api_url"];

/// Schemes that must never end up in a request URL.
const UNSAFE_SCHEMES: &[&str] = &["javascript:", "data:", "file:"];

/// Broadcast mentions Slack would expand if they reached a message or channel name.
const BROADCAST_MENTIONS: &[&str] = &["<!channel>", "<!here>", "<!everyone>"];

/// Scan URL fields for unsafe schemes and Slack fields for broadcast mentions.
/// Everything else, component names included, passes through untouched.
pub fn validate_security_patterns(value: &serde_yaml::Value) -> Result<(), ReporterError> {
    check_value(value, &[])
}

fn patterns_for(path: &str) -> Vec<&'static str> {
    let mut patterns = Vec::new();
    if URL_FIELDS.contains(&path) {
        patterns.extend_from_slice(UNSAFE_SCHEMES);
    }
    if path.starts_with("slack.") {
        patterns.extend_from_slice(BROADCAST_MENTIONS);
    }
    patterns
}

fn check_value(value: &serde_yaml::Value, path: &[String]) -> Result<(), ReporterError> {
    match value {
        serde_yaml::Value::String(s) => {
            let path_str = if path.is_empty() { "root".to_string() } else { path.join(".") };
            let lower = s.to_lowercase();
            for pattern in patterns_for(&path_str) {
                if lower.contains(pattern) {
                    return Err(ReporterError::Config(
                        format!("Unsafe pattern '{}' found at config path: {}", pattern, path_str)
                    ));
                }
            }
            Ok(())
        }
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let key = k.as_str().unwrap_or("unknown").to_string();
                let mut new_path = path.to_vec();
                new_path.push(key);
                check_value(v, &new_path)?;
            }
            Ok(())
        }
        serde_yaml::Value::Sequence(seq) => {
            for (i, v) in seq.iter().enumerate() {
                let mut new_path = path.to_vec();
                new_path.push(format!("[{}]", i));
                check_value(v, &new_path)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
