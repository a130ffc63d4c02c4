use super::model::ParsedRecord;

const KEY_GROUP_DELIMITER: char = ':';
const KEY_DELIMITER: char = '.';

/// Rewrite every key into its canonical flat form: trim, drop one trailing
/// group delimiter, turn the remaining group delimiters into dots, remove
/// spaces, then keep only the most specific path segment.
///
/// Truncation discards hierarchy on purpose, so two distinct paths ending in
/// the same leaf name collide and the later-iterated key wins (records
/// iterate in key order). Known and accepted cost of the canonical schema.
/// Values pass through unchanged.
pub fn normalize(record: &ParsedRecord) -> ParsedRecord {
    let mut normalized = ParsedRecord::new();
    for (key, value) in record.iter() {
        normalized.insert(normalize_key(key), value.clone());
    }
    normalized
}

fn normalize_key(key: &str) -> String {
    let mut new_key = key.trim().to_string();
    if let Some(stripped) = new_key.strip_suffix(KEY_GROUP_DELIMITER) {
        new_key = stripped.to_string();
    }
    new_key = new_key
        .replace(KEY_GROUP_DELIMITER, &KEY_DELIMITER.to_string())
        .replace(' ', "");

    match last_segment(&new_key) {
        Some(leaf) => leaf.to_string(),
        None => new_key,
    }
}

/// Last non-empty dot segment of a key; trailing empty segments are ignored.
fn last_segment(key: &str) -> Option<&str> {
    let mut parts: Vec<&str> = key.split(KEY_DELIMITER).collect();
    while parts.last() == Some(&"") {
        parts.pop();
    }
    parts.last().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_to_leaf_segment() {
        let mut record = ParsedRecord::new();
        record.insert("Group1:Group2:leaf", "v");
        let normalized = normalize(&record);
        assert_eq!(normalized.get_str("leaf"), Some("v"));
        assert_eq!(normalized.len(), 1);
    }

    #[test]
    fn test_strips_trailing_group_delimiter_and_spaces() {
        let mut record = ParsedRecord::new();
        record.insert("Subject:Account Name:", "DC01$");
        let normalized = normalize(&record);
        assert_eq!(normalized.get_str("AccountName"), Some("DC01$"));
    }

    #[test]
    fn test_dotted_csv_keys_truncate_too() {
        let mut record = ParsedRecord::new();
        record.insert("Subject.Account", "admin");
        let normalized = normalize(&record);
        assert_eq!(normalized.get_str("Account"), Some("admin"));
    }

    #[test]
    fn test_collision_keeps_later_iterated_key() {
        // Both keys truncate to "x"; iteration is in key order, so the value
        // of "B:x" lands last. Documented lossy behavior, not a bug.
        let mut record = ParsedRecord::new();
        record.insert("A:x", "first");
        record.insert("B:x", "second");
        let normalized = normalize(&record);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized.get_str("x"), Some("second"));
    }

    #[test]
    fn test_values_unchanged() {
        let mut record = ParsedRecord::new();
        record.insert("a:b", 42i64);
        let normalized = normalize(&record);
        assert_eq!(normalized.get("b"), Some(&42i64.into()));
    }

    #[test]
    fn test_idempotent_on_normalized_records() {
        let mut record = ParsedRecord::new();
        record.insert("Subject:Security ID:", "S-1-5-18");
        record.insert("timestamp", 1472459401000i64);
        let once = normalize(&record);
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_plain_keys_pass_through() {
        let mut record = ParsedRecord::new();
        record.insert("syslogHost", "dc01");
        let normalized = normalize(&record);
        assert_eq!(normalized.get_str("syslogHost"), Some("dc01"));
    }
}
