//! Shared primitive types.

/// All entity and history-entry identifiers are UUID v7 strings.
///
/// String ids (rather than integers) because the backing store is a document
/// store keyed by opaque string ids.
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh entity id.
///
/// UUID v7 so ids sort roughly by creation time.
pub fn new_entity_id() -> EntityId {
    uuid::Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = new_entity_id();
        let b = new_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn generated_ids_are_valid_uuids() {
        let id = new_entity_id();
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }
}
