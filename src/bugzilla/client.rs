use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use crate::config::{BugzillaConfig, DEFAULT_TIMEOUT_SECS};
use crate::errors::ReporterError;
use crate::models::BugRecord;
use super::query::BugQuery;
use tracing::debug;

#[async_trait]
pub trait BugTrackerClient: Send + Sync {
    /// Run a search and return every matching bug, in tracker order.
    async fn search(&self, query: &BugQuery) -> Result<Vec<BugRecord>, ReporterError>;

    /// Tracker name for logging
    fn tracker_name(&self) -> &str;
}

pub struct BugzillaClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl BugzillaClient {
    pub fn new(config: &BugzillaConfig) -> Result<Self, ReporterError> {
        let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReporterError::Config(format!("Failed to build Bugzilla HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    pub fn search_url(&self) -> String {
        format!("{}/rest/bug", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    bugs: Vec<BugRecord>,
    #[serde(default)]
    error: bool,
    message: Option<String>,
    code: Option<i64>,
}

/// Decode a `/rest/bug` response body. Bugzilla reports some failures with a
/// 200 status and `"error": true`, so the body is checked either way.
pub fn parse_search_response(body: &str) -> Result<Vec<BugRecord>, ReporterError> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| ReporterError::Query(format!("Failed to parse Bugzilla response: {}", e)))?;

    if response.error {
        return Err(bugzilla_error(response));
    }

    Ok(response.bugs)
}

/// Error for a non-2xx response: the Bugzilla error message when the body is
/// a JSON error document, otherwise just the status.
pub fn error_for_status(status: reqwest::StatusCode, body: &str) -> ReporterError {
    match serde_json::from_str::<SearchResponse>(body) {
        Ok(response) if response.error => bugzilla_error(response),
        _ => ReporterError::Query(format!("Bugzilla returned HTTP {}", status)),
    }
}

fn bugzilla_error(response: SearchResponse) -> ReporterError {
    let msg = response.message.unwrap_or_else(|| "Unknown error".to_string());
    match response.code {
        Some(code) => ReporterError::Query(format!("Bugzilla error {}: {}", code, msg)),
        None => ReporterError::Query(format!("Bugzilla error: {}", msg)),
    }
}

#[async_trait]
impl BugTrackerClient for BugzillaClient {
    async fn search(&self, query: &BugQuery) -> Result<Vec<BugRecord>, ReporterError> {
        let mut request = self.client
            .get(self.search_url())
            .query(&query.to_params())
            .header("accept", "application/json");

        if let Some(key) = &self.api_key {
            request = request.header("X-BUGZILLA-API-KEY", key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| ReporterError::Query(format!("Bugzilla request failed: {}", e)))?;

        let status = resp.status();
        let body = resp.text().await
            .map_err(|e| ReporterError::Query(format!("Failed to read Bugzilla response: {}", e)))?;

        if !status.is_success() {
            return Err(error_for_status(status, &body));
        }

        let bugs = parse_search_response(&body)?;
        debug!(url = %self.search_url(), count = bugs.len(), "Bugzilla search");
        Ok(bugs)
    }

    fn tracker_name(&self) -> &str { "bugzilla" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bugs() {
        let body = r#"{"bugs": [{"id": 1, "resolution": "FIXED"}, {"id": 2, "resolution": ""}]}"#;
        let bugs = parse_search_response(body).unwrap();
        assert_eq!(bugs.len(), 2);
        assert_eq!(bugs[0], BugRecord::new(1, "FIXED"));
        assert_eq!(bugs[1].resolution, "");
    }

    #[test]
    fn test_parse_empty_result() {
        let bugs = parse_search_response(r#"{"bugs": []}"#).unwrap();
        assert!(bugs.is_empty());
    }

    #[test]
    fn test_parse_error_body() {
        let body = r#"{"error": true, "code": 102, "message": "You are not authorized"}"#;
        let err = parse_search_response(body).unwrap_err();
        assert!(matches!(err, ReporterError::Query(_)));
        assert!(err.to_string().contains("102"));
        assert!(err.to_string().contains("not authorized"));
    }

    #[test]
    fn test_parse_null_display_fields() {
        let body = r#"{"bugs":[{"id":1,"resolution":"FIXED","cf_devel_whiteboard":null,"assigned_to":null,"target_release":null}]}"#;
        let bugs = parse_search_response(body).unwrap();
        assert_eq!(bugs, vec![BugRecord::new(1, "FIXED")]);
    }

    #[test]
    fn test_status_error_uses_json_message() {
        let body = r#"{"error": true, "code": 32000, "message": "Invalid API key"}"#;
        let err = error_for_status(reqwest::StatusCode::UNAUTHORIZED, body);
        assert_eq!(err.to_string(), "Bug search failed: Bugzilla error 32000: Invalid API key");
    }

    #[test]
    fn test_status_error_with_html_body_keeps_status() {
        let body = "<html><body>\"error\": upstream proxy failure</body></html>";
        let err = error_for_status(reqwest::StatusCode::BAD_GATEWAY, body);
        assert_eq!(err.to_string(), "Bug search failed: Bugzilla returned HTTP 502 Bad Gateway");
    }

    #[test]
    fn test_parse_garbage_is_query_error() {
        let err = parse_search_response("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ReporterError::Query(_)));
    }

    #[test]
    fn test_search_url_trims_trailing_slash() {
        let client = BugzillaClient::new(&BugzillaConfig {
            base_url: "https://bugzilla.example.com/".into(),
            api_key: Some(String::new()),
            timeout_secs: Some(5),
        }).unwrap();
        assert_eq!(client.search_url(), "https://bugzilla.example.com/rest/bug");
        assert!(client.api_key.is_none());
    }
}
