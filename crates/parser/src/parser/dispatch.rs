use tracing::debug;

use crate::conf::ParserConfig;

use super::formats::{CsvTokenizer, SyslogTokenizer};
use super::model::{ParseFailure, ParsedRecord, StreamFormat};
use super::traits::FrameTokenizer;
use super::{normalize, transform, ORIGINAL_STRING_KEY};

/// Per-message parse pipeline: decode, tokenize with the configured wire
/// format, optionally normalize and rename, then append the raw text.
///
/// The tokenizer is selected once at construction and never per message.
/// `Dispatcher` holds no mutable state, so one instance can serve
/// concurrent callers.
pub struct Dispatcher {
    config: ParserConfig,
    tokenizer: Tokenizer,
}

/// The configured tokenizer. There are exactly two encodings and the choice
/// is fixed for the life of the dispatcher, so a tagged variant fits better
/// than a boxed trait object.
enum Tokenizer {
    Syslog(SyslogTokenizer),
    Csv(CsvTokenizer),
}

impl Tokenizer {
    fn for_format(format: StreamFormat) -> Self {
        match format {
            StreamFormat::Syslog => Tokenizer::Syslog(SyslogTokenizer),
            StreamFormat::Csv => Tokenizer::Csv(CsvTokenizer),
        }
    }

    fn tokenize(&self, text: &str) -> Result<ParsedRecord, super::model::ParseError> {
        match self {
            Tokenizer::Syslog(tokenizer) => tokenizer.tokenize(text),
            Tokenizer::Csv(tokenizer) => tokenizer.tokenize(text),
        }
    }
}

impl Dispatcher {
    pub fn new(config: ParserConfig) -> Self {
        let tokenizer = Tokenizer::for_format(config.stream_format);
        Self { config, tokenizer }
    }

    /// Parse one raw frame into zero or one records.
    ///
    /// Any failure aborts the whole message: nothing partial is emitted and
    /// the returned failure carries the original text with its cause. Retry
    /// policy belongs to the host pipeline, not here.
    pub fn parse(&self, raw: &[u8]) -> Result<Option<ParsedRecord>, ParseFailure> {
        let text = std::str::from_utf8(raw).map_err(|_| ParseFailure {
            original: String::from_utf8_lossy(raw).into_owned(),
            cause: super::model::ParseError::NonUtf8,
        })?;
        debug!("received message: {}", text);

        let mut record = self
            .tokenizer
            .tokenize(text)
            .map_err(|cause| ParseFailure {
                original: text.to_string(),
                cause,
            })?;
        if record.is_empty() {
            return Ok(None);
        }

        if self.config.normalize_for_metron {
            record = normalize::normalize(&record);
        }
        if self.config.transform_keys_for_metron {
            transform::transform_keys(&mut record);
        }

        record.insert(ORIGINAL_STRING_KEY, text);
        Ok(Some(record))
    }

    pub fn format(&self) -> StreamFormat {
        self.config.stream_format
    }
}
