//! Diff engine: human-readable change summaries between two versions of an
//! entity record.
//!
//! Records are compared as opaque JSON objects so a single implementation
//! serves every entity type. Only top-level fields are diffed; nested
//! sub-object lists that have their own update paths are excluded, as are
//! identifiers, audit timestamps, and credential-like fields.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::audit::is_sensitive_field;

/// Summary returned when the entity had no prior state.
pub const CREATED: &str = "Created";

/// Summary returned when no non-ignored field changed.
pub const NO_CHANGES: &str = "No significant changes";

/// Fields never surfaced in a change summary.
///
/// `ad_accounts`, `apps`, and `subdomains` are nested sub-object lists
/// maintained by their own update paths; credential-like fields are excluded
/// via [`is_sensitive_field`] on top of this list.
pub const IGNORED_FIELDS: &[&str] = &[
    "id",
    "created_at",
    "updated_at",
    "ad_accounts",
    "apps",
    "subdomains",
];

/// Multi-select fields that get element-level deltas despite not carrying the
/// `_ids` suffix.
pub const MULTI_SELECT_FIELDS: &[&str] = &["countries", "categories", "permissions"];

/// Maximum characters of a primitive value shown in a summary fragment.
const MAX_DISPLAY_LEN: usize = 20;

/// Compute a human-readable change summary between two records.
///
/// Pure and deterministic: fragments are emitted in sorted key order (the
/// underlying `serde_json::Map` is a `BTreeMap`), joined with `"; "`.
///
/// - `old == None` yields [`CREATED`].
/// - No changed non-ignored fields yields [`NO_CHANGES`].
/// - Arrays compare order-independently; id-list fields (suffix `_ids` or a
///   known multi-select) emit `field: [+a, b; -c]` element deltas.
/// - Nested objects emit `field updated`; primitives emit
///   `field: old -> new` with both sides truncated for display.
pub fn change_summary(old: Option<&Value>, new: &Value) -> String {
    let Some(old) = old else {
        return CREATED.to_string();
    };

    let empty = serde_json::Map::new();
    let new_map = new.as_object().unwrap_or(&empty);
    let old_map = old.as_object().unwrap_or(&empty);

    let mut fragments: Vec<String> = Vec::new();

    for (key, new_raw) in new_map {
        if is_ignored(key) {
            continue;
        }

        let old_val = normalize(old_map.get(key));
        let new_val = normalize(Some(new_raw));
        if old_val == new_val {
            continue;
        }

        match (&old_val, &new_val) {
            (Value::Array(old_arr), Value::Array(new_arr)) => {
                // Order-independent: [A, B] vs [B, A] is not a change.
                if sorted_elements(old_arr) == sorted_elements(new_arr) {
                    continue;
                }
                if is_id_list_field(key) {
                    fragments.push(array_delta(key, old_arr, new_arr));
                } else {
                    fragments.push(format!("{key} changed"));
                }
            }
            (Value::Object(_), Value::Object(_)) => {
                fragments.push(format!("{key} updated"));
            }
            _ => {
                fragments.push(format!(
                    "{key}: {} -> {}",
                    display(&old_val),
                    display(&new_val)
                ));
            }
        }
    }

    if fragments.is_empty() {
        NO_CHANGES.to_string()
    } else {
        fragments.join("; ")
    }
}

/// Returns `true` if the field is excluded from change summaries.
pub fn is_ignored(field: &str) -> bool {
    IGNORED_FIELDS.contains(&field) || is_sensitive_field(field)
}

/// Returns `true` if the field follows the id-list naming convention.
pub fn is_id_list_field(field: &str) -> bool {
    field.ends_with("_ids") || MULTI_SELECT_FIELDS.contains(&field)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Normalize a value for comparison: absent and `null` both become `""`.
///
/// Timestamps need no special handling -- they are already ISO-8601 strings
/// in serialized form.
fn normalize(value: Option<&Value>) -> Value {
    match value {
        None | Some(Value::Null) => Value::String(String::new()),
        Some(v) => v.clone(),
    }
}

/// Canonical string form of an array element, for set comparison and display.
fn element_repr(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Sorted element representations, for order-independent array equality.
fn sorted_elements(arr: &[Value]) -> Vec<String> {
    let mut elems: Vec<String> = arr.iter().map(element_repr).collect();
    elems.sort();
    elems
}

/// Emit a `field: [+added; -removed]` fragment for an id-list field.
///
/// Falls back to `field changed` when no element-level difference can be
/// identified (e.g. the arrays differ only in duplicate multiplicity).
fn array_delta(field: &str, old_arr: &[Value], new_arr: &[Value]) -> String {
    let old_set: BTreeSet<String> = old_arr.iter().map(element_repr).collect();
    let new_set: BTreeSet<String> = new_arr.iter().map(element_repr).collect();

    let added: Vec<String> = new_set.difference(&old_set).cloned().collect();
    let removed: Vec<String> = old_set.difference(&new_set).cloned().collect();

    if added.is_empty() && removed.is_empty() {
        return format!("{field} changed");
    }

    let mut parts: Vec<String> = Vec::new();
    if !added.is_empty() {
        parts.push(format!("+{}", added.join(", ")));
    }
    if !removed.is_empty() {
        parts.push(format!("-{}", removed.join(", ")));
    }
    format!("{field}: [{}]", parts.join("; "))
}

/// Bounded display form of a primitive value.
fn display(value: &Value) -> String {
    let raw = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if raw.chars().count() > MAX_DISPLAY_LEN {
        let head: String = raw.chars().take(MAX_DISPLAY_LEN).collect();
        format!("{head}...")
    } else {
        raw
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
