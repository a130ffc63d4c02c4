//! Model — ParserConfig and the host-pipeline option contract.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::parser::StreamFormat;

/// Recognized host-pipeline option names.
pub const STREAM_FORMAT: &str = "streamFormat";
pub const NORMALIZE_FOR_METRON: &str = "normalizeForMetron";
pub const TRANSFORM_KEYS_FOR_METRON: &str = "transformKeysForMetron";

/// Parser configuration, chosen once before any parse call and held
/// immutably for the life of the parser instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub stream_format: StreamFormat,
    pub normalize_for_metron: bool,
    pub transform_keys_for_metron: bool,
    /// CLI-only output toggle; the host pipeline ignores it.
    pub pretty_print: bool,
}

impl ParserConfig {
    /// Build from the host pipeline's string option map.
    ///
    /// `streamFormat` falls back to syslog when absent; the boolean-like
    /// options are true only for the literal value `"yes"` — any other
    /// value is falsy.
    pub fn from_options(options: &HashMap<String, String>) -> Self {
        Self {
            stream_format: StreamFormat::from_selector(
                options.get(STREAM_FORMAT).map(String::as_str),
            ),
            normalize_for_metron: is_truthy(options.get(NORMALIZE_FOR_METRON)),
            transform_keys_for_metron: is_truthy(options.get(TRANSFORM_KEYS_FOR_METRON)),
            pretty_print: false,
        }
    }
}

pub(crate) fn is_truthy(value: Option<&String>) -> bool {
    value.map(|v| v == "yes").unwrap_or(false)
}
