//! Audit vocabulary and snapshot redaction.
//!
//! This module lives in `core` (zero internal deps) so it can be used by both
//! the repository layer and any future worker or CLI tooling.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Audit actions
// ---------------------------------------------------------------------------

/// The action recorded by a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Activate,
    Deactivate,
}

impl AuditAction {
    /// String representation for display, logging, and store persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
            Self::Activate => "Activate",
            Self::Deactivate => "Deactivate",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Sensitive field redaction
// ---------------------------------------------------------------------------

/// Field-name fragments whose values must never reach a persisted snapshot.
pub const SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "secret",
    "token",
    "api_key",
    "recovery",
    "two_factor",
    "credential",
];

/// Returns `true` if a field name matches the sensitive-field list.
pub fn is_sensitive_field(name: &str) -> bool {
    let lower = name.to_lowercase();
    SENSITIVE_FIELDS.iter().any(|f| lower.contains(f))
}

/// Redact sensitive fields from a JSON value before snapshot storage.
///
/// Replaces the value of any key matching [`SENSITIVE_FIELDS`] with
/// `"[REDACTED]"`, recursing into nested objects and arrays.
pub fn redact_sensitive_fields(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut redacted = serde_json::Map::new();
            for (key, val) in map {
                if is_sensitive_field(key) {
                    redacted.insert(
                        key.clone(),
                        serde_json::Value::String("[REDACTED]".to_string()),
                    );
                } else {
                    redacted.insert(key.clone(), redact_sensitive_fields(val));
                }
            }
            serde_json::Value::Object(redacted)
        }
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(redact_sensitive_fields).collect())
        }
        other => other.clone(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_as_str() {
        assert_eq!(AuditAction::Create.as_str(), "Create");
        assert_eq!(AuditAction::Deactivate.as_str(), "Deactivate");
    }

    #[test]
    fn action_display_matches_as_str() {
        assert_eq!(format!("{}", AuditAction::Delete), "Delete");
    }

    #[test]
    fn action_serde_roundtrip() {
        let json = serde_json::to_string(&AuditAction::Update).unwrap();
        assert_eq!(json, "\"Update\"");
        let parsed: AuditAction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, AuditAction::Update);
    }

    #[test]
    fn redacts_password_field() {
        let input = serde_json::json!({"name": "alice", "password": "s3cret"});
        let result = redact_sensitive_fields(&input);
        assert_eq!(result["name"], "alice");
        assert_eq!(result["password"], "[REDACTED]");
    }

    #[test]
    fn redacts_api_key_and_recovery_codes() {
        let input = serde_json::json!({"api_key": "k", "recovery_codes": "1 2 3"});
        let result = redact_sensitive_fields(&input);
        assert_eq!(result["api_key"], "[REDACTED]");
        assert_eq!(result["recovery_codes"], "[REDACTED]");
    }

    #[test]
    fn handles_nested_objects_and_arrays() {
        let input = serde_json::json!({"apps": [{"two_factor_secret": "x", "name": "app"}]});
        let result = redact_sensitive_fields(&input);
        assert_eq!(result["apps"][0]["two_factor_secret"], "[REDACTED]");
        assert_eq!(result["apps"][0]["name"], "app");
    }

    #[test]
    fn non_object_values_unchanged() {
        let input = serde_json::json!("plain");
        assert_eq!(redact_sensitive_fields(&input), "plain");
    }
}
