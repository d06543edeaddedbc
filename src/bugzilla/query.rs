use serde::Serialize;
use crate::config::ReportConfig;

/// Fields requested alongside every closed-bugs search so the records are
/// usable for display, even though the digest itself only reads id and resolution.
pub const INCLUDE_FIELDS: &[&str] = &[
    "assigned_to",
    "keywords",
    "status",
    "resolution",
    "severity",
    "priority",
    "target_release",
    "cf_devel_whiteboard",
];

/// One Bugzilla "advanced search" triple (`f<n>`, `o<n>`, `v<n>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvancedQuery {
    pub field: String,
    pub op: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BugQuery {
    pub classification: Vec<String>,
    pub product: Vec<String>,
    pub status: Vec<String>,
    /// Empty means the parameter is omitted, i.e. every component.
    pub component: Vec<String>,
    pub advanced: Vec<AdvancedQuery>,
    pub include_fields: Vec<String>,
}

impl BugQuery {
    /// Bugs whose status changed within the last day and are now in the
    /// configured status. The window is relative ("-1d") and evaluated by the
    /// tracker at request time.
    pub fn closed_in_last_day(config: &ReportConfig) -> Self {
        Self {
            classification: vec![config.classification.clone()],
            product: vec![config.product.clone()],
            status: vec![config.status.clone()],
            component: config.components.iter().cloned().collect(),
            advanced: vec![AdvancedQuery {
                field: "bug_status".to_string(),
                op: "changedafter".to_string(),
                value: "-1d".to_string(),
            }],
            include_fields: INCLUDE_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Encode as Bugzilla REST `GET /rest/bug` query parameters.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        for value in &self.classification {
            params.push(("classification".to_string(), value.clone()));
        }
        for value in &self.product {
            params.push(("product".to_string(), value.clone()));
        }
        for value in &self.status {
            params.push(("status".to_string(), value.clone()));
        }
        for value in &self.component {
            params.push(("component".to_string(), value.clone()));
        }
        for (i, adv) in self.advanced.iter().enumerate() {
            let n = i + 1;
            params.push((format!("f{}", n), adv.field.clone()));
            params.push((format!("o{}", n), adv.op.clone()));
            params.push((format!("v{}", n), adv.value.clone()));
        }
        if !self.include_fields.is_empty() {
            let mut fields = Vec::with_capacity(self.include_fields.len() + 1);
            if !self.include_fields.iter().any(|f| f == "id") {
                fields.push("id");
            }
            fields.extend(self.include_fields.iter().map(String::as_str));
            params.push(("include_fields".to_string(), fields.join(",")));
        }
        params
    }
}
