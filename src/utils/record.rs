use surrealdb::RecordId;

/// Builds a record id from a path segment. Accepts either a bare key or a
/// full `table:key` string as produced by [`id_string`].
pub fn record_id(table: &str, val: &str) -> RecordId {
    let key = match val.split_once(':') {
        Some((tb, key)) if tb == table => key,
        _ => val,
    };
    RecordId::from_table_key(table, key.trim_matches(|c| c == '\u{27E8}' || c == '\u{27E9}'))
}

/// `table:key` form without the bracket escaping SurrealDB applies to
/// keys that start with a digit, so ids stay URL-safe.
pub fn id_string(rid: &RecordId) -> String {
    rid.to_string()
        .replace(['\u{27E8}', '\u{27E9}'], "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_key_round_trip() {
        let rid = record_id("projects", "abc123");
        assert_eq!(id_string(&rid), "projects:abc123");
    }

    #[test]
    fn test_full_id_round_trip() {
        let rid = record_id("projects", "projects:abc123");
        assert_eq!(id_string(&rid), "projects:abc123");
    }

    #[test]
    fn test_numeric_leading_key_is_unbracketed() {
        let rid = record_id("events", "0abc");
        assert_eq!(id_string(&rid), "events:0abc");
        assert_eq!(record_id("events", &id_string(&rid)), rid);
    }
}
