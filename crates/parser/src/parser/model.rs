use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamFormat {
    /// Tab-fragmented syslog envelope around the audit message
    #[default]
    Syslog,
    /// `timestamp,body` with escaped-newline separated terms
    Csv,
}

impl StreamFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamFormat::Syslog => "syslog",
            StreamFormat::Csv => "csv",
        }
    }

    /// Map the `streamFormat` wire selector onto a format. Anything other
    /// than `"csv"`, including an absent selector, falls back to syslog.
    pub fn from_selector(value: Option<&str>) -> Self {
        match value {
            Some("csv") => StreamFormat::Csv,
            Some("syslog") | None => StreamFormat::Syslog,
            Some(other) => {
                tracing::warn!("unrecognized streamFormat {:?}, defaulting to syslog", other);
                StreamFormat::Syslog
            }
        }
    }
}

impl std::fmt::Display for StreamFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("non-UTF8 content")]
    NonUtf8,

    #[error("malformed {format} frame: {reason}")]
    MalformedFrame { format: StreamFormat, reason: String },

    #[error("timestamp {value:?} does not match pattern {pattern}")]
    TimestampFormat { value: String, pattern: &'static str },

    #[error("field {field} is not numeric: {value:?}")]
    IntegerFormat { field: &'static str, value: String },
}

/// A whole-message parse failure. Carries the original decoded text (lossy
/// when the bytes were not valid UTF-8) alongside the underlying cause so
/// the host pipeline never loses the raw line.
#[derive(Debug, Error)]
#[error("unable to parse {original:?}")]
pub struct ParseFailure {
    pub original: String,
    #[source]
    pub cause: ParseError,
}

/// Flat mapping from field name to a string or integer value, one per
/// successfully parsed frame. Keys are unique; repeated tokenizer writes to
/// the same key go through [`ParsedRecord::merge_insert`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParsedRecord(Map<String, Value>);

impl ParsedRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Insert or overwrite a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Insert a field, concatenating onto any existing value with a single
    /// space. Repeated visits to one group/key combination within a frame
    /// merge rather than overwrite.
    pub fn merge_insert(&mut self, key: &str, value: &str) {
        match self.0.get_mut(key) {
            Some(Value::String(existing)) => {
                existing.push(' ');
                existing.push_str(value);
            }
            Some(existing) => {
                *existing = Value::String(format!("{} {}", existing, value));
            }
            None => {
                self.0.insert(key.to_string(), Value::String(value.to_string()));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Cosmetic multi-line JSON rendition.
    pub fn to_pretty_string(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "{}".to_string())
    }
}

impl std::fmt::Display for ParsedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(&self.0) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(std::fmt::Error),
        }
    }
}

impl FromIterator<(String, Value)> for ParsedRecord {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
