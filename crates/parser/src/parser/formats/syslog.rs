use chrono::format::{parse, Parsed, StrftimeItems};

use crate::parser::traits::{FrameTokenizer, ParseError, ParsedRecord, StreamFormat};

const FRAGMENT_DELIMITER: char = '\t';
const KEY_GROUP_DELIMITER: char = ':';
const INTERNAL_SPLIT_TOKEN: &str = "|";
const SYSLOG_HEADER_OFFSET: usize = 4;
const MIN_FRAGMENTS: usize = 14;
const MIN_HEADER_FIELDS: usize = 5;

/// Date pattern of the audit-message timestamp fragment, in the producing
/// system's own notation. The year field is five digits wide on the wire;
/// see [`parse_body_timestamp`].
const BODY_DATE_PATTERN: &str = "EEE MMM dd HH:mm:ss yyyyy";
const BODY_DATE_HEAD_FORMAT: &str = "%a %b %d %H:%M:%S";

/// Tokenizer for the syslog-wrapped encoding.
///
/// A frame is a run of tab-separated fragments: fragment 0 carries the
/// syslog header, fragments 1/2/4/6/8/11 carry fixed-position metadata, and
/// fragment 13 carries the audit-message payload whose key groups nest.
pub struct SyslogTokenizer;

impl FrameTokenizer for SyslogTokenizer {
    fn tokenize(&self, text: &str) -> Result<ParsedRecord, ParseError> {
        let fragments: Vec<&str> = text.split(FRAGMENT_DELIMITER).collect();
        if fragments.len() < MIN_FRAGMENTS {
            return Err(malformed(format!(
                "expected at least {} tab-separated fragments, got {}",
                MIN_FRAGMENTS,
                fragments.len()
            )));
        }

        let mut record = parse_header(fragments[0])?;

        let message_type = fragments[1].trim();
        let message_type: i64 = message_type.parse().map_err(|_| ParseError::IntegerFormat {
            field: "syslogMessageType",
            value: message_type.to_string(),
        })?;
        record.insert("syslogMessageType", message_type);
        record.insert("syslogMessageCategory", fragments[2].trim());
        record.insert("timestamp", parse_body_timestamp(fragments[4].trim())?);
        record.insert("auditProcess", fragments[6].trim());
        record.insert("auditType", fragments[8].trim());
        record.insert("eventType", fragments[11].trim());

        parse_audit_message(fragments[13], &mut record);
        Ok(record)
    }

    fn format(&self) -> StreamFormat {
        StreamFormat::Syslog
    }
}

fn malformed(reason: String) -> ParseError {
    ParseError::MalformedFrame {
        format: StreamFormat::Syslog,
        reason,
    }
}

/// Extract timestamp, host, and log source from the header fragment, after
/// skipping the fixed 4-character prefix.
fn parse_header(fragment: &str) -> Result<ParsedRecord, ParseError> {
    let header = fragment
        .get(SYSLOG_HEADER_OFFSET..)
        .ok_or_else(|| malformed(format!("header fragment shorter than {} characters", SYSLOG_HEADER_OFFSET)))?;

    let fields: Vec<&str> = header.split_whitespace().collect();
    if fields.len() < MIN_HEADER_FIELDS {
        return Err(malformed(format!(
            "header yields {} of {} whitespace-separated fields",
            fields.len(),
            MIN_HEADER_FIELDS
        )));
    }

    // The producer duplicates the time-of-day field instead of appending a
    // year. Downstream consumers depend on this exact shape.
    let timestamp = format!("{} {} {} {}", fields[0], fields[1], fields[2], fields[2]);

    let mut record = ParsedRecord::new();
    record.insert("syslogTimestamp", timestamp);
    record.insert("syslogHost", fields[3]);
    record.insert("logSource", fields[4]);
    Ok(record)
}

/// Parse the `EEE MMM dd HH:mm:ss yyyyy` timestamp fragment into epoch
/// milliseconds (UTC).
///
/// The producing formatter zero-pads the year to five digits, so a plain
/// four-digit year never occurs on this wire and is rejected.
fn parse_body_timestamp(value: &str) -> Result<i64, ParseError> {
    let bad_timestamp = || ParseError::TimestampFormat {
        value: value.to_string(),
        pattern: BODY_DATE_PATTERN,
    };

    let (head, year) = value.rsplit_once(' ').ok_or_else(bad_timestamp)?;
    if year.len() != 5 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad_timestamp());
    }
    let year: i64 = year.parse().map_err(|_| bad_timestamp())?;

    let mut parsed = Parsed::new();
    parse(&mut parsed, head, StrftimeItems::new(BODY_DATE_HEAD_FORMAT)).map_err(|_| bad_timestamp())?;
    parsed.set_year(year).map_err(|_| bad_timestamp())?;
    let datetime = parsed
        .to_naive_datetime_with_offset(0)
        .map_err(|_| bad_timestamp())?;
    Ok(datetime.and_utc().timestamp_millis())
}

/// Walk the audit-message payload and emit flat `Group1:Group2:leaf:` keys.
///
/// A pre-pass rewrites space runs into an internal split token so the
/// payload splits into terms; the rewrite order matters. Terms ending in the
/// group delimiter push onto the concatenated group key, other terms emit a
/// value at the current key and then pop one level.
fn parse_audit_message(raw: &str, record: &mut ParsedRecord) {
    let delimited = raw
        .replace("   ", INTERNAL_SPLIT_TOKEN)
        .replace(": ", &format!("{}{}", KEY_GROUP_DELIMITER, INTERNAL_SPLIT_TOKEN))
        .replace("  ", INTERNAL_SPLIT_TOKEN);

    let mut terms: Vec<&str> = delimited.trim().split(INTERNAL_SPLIT_TOKEN).collect();
    while terms.last() == Some(&"") {
        terms.pop();
    }

    let mut key_group = String::new();
    // Term 0 is the free-text event description, consumed upstream.
    let mut i = 1;
    while i < terms.len() {
        let mut term = terms[i].trim();

        // Consecutive group labels extend the path; the final term of the
        // payload is always treated as a leaf.
        while term.ends_with(KEY_GROUP_DELIMITER) && i < terms.len() - 1 {
            key_group.push_str(term);
            i += 1;
            term = terms[i].trim();
        }

        record.merge_insert(&key_group, term);
        key_group = parent_group(&key_group);
        i += 1;
    }
}

/// Drop the last component of a concatenated group key, returning to the
/// parent scope. The first component is always retained and trailing empty
/// components are discarded before popping, mirroring the producer's key
/// reassembly exactly.
fn parent_group(key: &str) -> String {
    let mut parts: Vec<&str> = key.split(KEY_GROUP_DELIMITER).collect();
    while parts.len() > 1 && parts.last() == Some(&"") {
        parts.pop();
    }

    let keep = parts.len().saturating_sub(1).max(1);
    let mut parent = String::new();
    for part in &parts[..keep] {
        parent.push_str(part);
        parent.push(KEY_GROUP_DELIMITER);
    }
    parent
}
