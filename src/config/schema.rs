use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "bugzilla": {
                "type": "object",
                "properties": {
                    "base_url": { "type": "string", "format": "uri" },
                    "api_key": { "type": "string" },
                    "timeout_secs": { "type": "integer", "minimum": 1 }
                }
            },
            "report": {
                "type": "object",
                "properties": {
                    "classification": { "type": "string" },
                    "product": { "type": "string" },
                    "status": { "type": "string" },
                    "components": { "type": "array", "items": { "type": "string" } }
                }
            },
            "slack": {
                "type": "object",
                "properties": {
                    "token": { "type": "string" },
                    "channel": { "type": "string" },
                    "webhook_url": { "type": "string", "format": "uri" },
                    "api_url": { "type": "string", "format": "uri" },
                    "timeout_secs": { "type": "integer", "minimum": 1 }
                }
            },
            "schedule": {
                "type": "object",
                "properties": {
                    "interval_secs": { "type": "integer", "minimum": 60 }
                }
            }
        }
    })
});
