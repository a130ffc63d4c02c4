pub use super::model::{ParseError, ParseFailure, ParsedRecord, StreamFormat};

/// One wire encoding's tokenizer.
///
/// Implementations hold no per-call state on the instance: every parse
/// carries its working state (group path, terms) on its own stack, so a
/// single tokenizer may serve concurrent invocations.
pub trait FrameTokenizer: Send + Sync {
    /// Tokenize one decoded frame into a flat record of named fields.
    fn tokenize(&self, text: &str) -> Result<ParsedRecord, ParseError>;
    fn format(&self) -> StreamFormat;
}
