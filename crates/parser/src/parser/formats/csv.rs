use crate::parser::traits::{FrameTokenizer, ParseError, ParsedRecord, StreamFormat};

const CSV_DELIMITER: char = ',';
/// Literal escaped-newline token (four characters) separating body terms.
const FIELD_SEPARATOR: &str = "\\r\\n";
const TIMESTAMP_PATTERN: &str = "ISO-8601 date-time";

/// Tokenizer for the comma-wrapped encoding: `timestamp,body` where the
/// body splits on an escaped-newline token into an event label plus
/// `key: value`, `group:`, and free-text terms.
///
/// Group tracking here is deliberately single-level: a new `group:` term
/// overwrites the previous one and free text clears it. The syslog
/// tokenizer's nesting stack does not apply to this encoding.
pub struct CsvTokenizer;

impl FrameTokenizer for CsvTokenizer {
    fn tokenize(&self, text: &str) -> Result<ParsedRecord, ParseError> {
        let parts: Vec<&str> = text.split(CSV_DELIMITER).collect();
        if parts.len() < 2 {
            return Err(ParseError::MalformedFrame {
                format: StreamFormat::Csv,
                reason: "expected `timestamp,body`".to_string(),
            });
        }

        let raw_timestamp = parts[0].trim();
        let timestamp = chrono::DateTime::parse_from_rfc3339(raw_timestamp)
            .map_err(|_| ParseError::TimestampFormat {
                value: raw_timestamp.to_string(),
                pattern: TIMESTAMP_PATTERN,
            })?
            .timestamp_millis();

        let mut record = ParsedRecord::new();
        record.insert("timestamp", timestamp);

        let terms: Vec<&str> = parts[1].split(FIELD_SEPARATOR).collect();
        record.insert("event", terms[0].trim());

        let mut current_group: Option<String> = None;
        for raw_term in &terms[1..] {
            let term = raw_term.trim();

            if let Some(group) = term.strip_suffix(':') {
                // New top-level group, discarding any previous one.
                current_group = Some(group.to_string());
            } else if let Some((key, value)) = term.split_once(':') {
                let value = value.trim().replace('"', "");
                let value = value.trim();
                match &current_group {
                    Some(group) => record.merge_insert(&format!("{}.{}", group, key), value),
                    None => record.merge_insert(key, value),
                }
            } else {
                if term.is_empty() {
                    if !record.contains_key("message") {
                        record.insert("message", "");
                    }
                } else {
                    record.merge_insert("message", term);
                }
                current_group = None;
            }
        }

        Ok(record)
    }

    fn format(&self) -> StreamFormat {
        StreamFormat::Csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_and_event() {
        let record = CsvTokenizer
            .tokenize("2016-08-29T08:30:01.000Z,Logon Attempt")
            .unwrap();
        assert_eq!(record.get("timestamp"), Some(&1472459401000i64.into()));
        assert_eq!(record.get_str("event"), Some("Logon Attempt"));
    }

    #[test]
    fn test_grouped_key_value_terms() {
        let record = CsvTokenizer
            .tokenize("2016-08-29T08:30:01.000Z,Logon\\r\\nSubject:\\r\\nAccount: \"admin\"")
            .unwrap();
        assert_eq!(record.get_str("Subject.Account"), Some("admin"));
    }

    #[test]
    fn test_ungrouped_key_value_term() {
        let record = CsvTokenizer
            .tokenize("2016-08-29T08:30:01.000Z,Logon\\r\\nAccount: admin")
            .unwrap();
        assert_eq!(record.get_str("Account"), Some("admin"));
    }

    #[test]
    fn test_new_group_overwrites_previous() {
        let record = CsvTokenizer
            .tokenize("2016-08-29T08:30:01.000Z,Logon\\r\\nA:\\r\\nB:\\r\\nkey: v")
            .unwrap();
        // Single-level tracking: B replaces A entirely, no nesting.
        assert_eq!(record.get_str("B.key"), Some("v"));
        assert!(!record.contains_key("A.B.key"));
        assert!(!record.contains_key("A.key"));
    }

    #[test]
    fn test_free_text_merges_into_message_and_clears_group() {
        let record = CsvTokenizer
            .tokenize("2016-08-29T08:30:01.000Z,Logon\\r\\nGroup:\\r\\nfree text\\r\\nmore\\r\\nkey: v")
            .unwrap();
        assert_eq!(record.get_str("message"), Some("free text more"));
        // Group was cleared by the free-text term.
        assert_eq!(record.get_str("key"), Some("v"));
        assert!(!record.contains_key("Group.key"));
    }

    #[test]
    fn test_quotes_stripped_from_values() {
        let record = CsvTokenizer
            .tokenize("2016-08-29T08:30:01.000Z,Logon\\r\\nhost: \" dc01 \"")
            .unwrap();
        assert_eq!(record.get_str("host"), Some("dc01"));
    }

    #[test]
    fn test_missing_body_is_malformed() {
        let err = CsvTokenizer.tokenize("no commas at all").unwrap_err();
        assert!(matches!(err, ParseError::MalformedFrame { .. }), "got {err:?}");
    }

    #[test]
    fn test_bad_timestamp() {
        let err = CsvTokenizer.tokenize("29/08/2016 08:30,body").unwrap_err();
        assert!(matches!(err, ParseError::TimestampFormat { .. }), "got {err:?}");
    }

    #[test]
    fn test_extra_commas_only_second_part_is_body() {
        let record = CsvTokenizer
            .tokenize("2016-08-29T08:30:01.000Z,Logon\\r\\nkey: v,ignored tail")
            .unwrap();
        assert_eq!(record.get_str("event"), Some("Logon"));
        assert_eq!(record.get_str("key"), Some("v"));
        assert!(!record.to_string().contains("ignored tail"));
    }
}
