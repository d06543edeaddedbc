use serde::{Deserialize, Deserializer, Serialize};

/// A bug as returned by the tracker search. Only `id` and `resolution` drive
/// the digest; the remaining fields are requested for downstream display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugRecord {
    pub id: u64,
    /// Empty for bugs the tracker reports without a resolution; still a group of its own.
    #[serde(default, deserialize_with = "null_as_default")]
    pub resolution: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assigned_to: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub severity: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_release: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cf_devel_whiteboard: String,
}

/// Trackers send `null` for unset fields; treat it like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl BugRecord {
    pub fn new(id: u64, resolution: &str) -> Self {
        Self {
            id,
            resolution: resolution.to_string(),
            assigned_to: String::new(),
            keywords: Vec::new(),
            status: String::new(),
            severity: String::new(),
            priority: String::new(),
            target_release: Vec::new(),
            cf_devel_whiteboard: String::new(),
        }
    }
}
