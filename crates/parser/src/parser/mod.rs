/// Audit-line parsing and normalization module
///
/// Converts one raw Active Directory audit log line, wrapped in either a
/// syslog or a CSV envelope, into a flat record of named fields suitable
/// for downstream indexing.
///
/// # Architecture
///
/// - `traits.rs`: the tokenizer seam shared by both wire encodings
/// - `formats/`: the syslog and CSV tokenizer implementations
/// - `normalize.rs`: canonical flat-key rewriting
/// - `transform.rs`: static renames onto the canonical output schema
/// - `dispatch.rs`: format selection and the per-message pipeline
///
/// Parsing is a pure, synchronous, per-message transformation. Tokenizers
/// carry no per-call state on the instance, so a single `Dispatcher` can be
/// shared across worker threads.

pub mod traits;
pub mod dispatch;
pub mod formats;
pub mod model;
pub mod normalize;
pub mod transform;

// Re-export commonly used types
pub use dispatch::Dispatcher;
pub use model::{ParseError, ParseFailure, ParsedRecord, StreamFormat};

/// Reserved key carrying the verbatim decoded input text. Appended last by
/// the dispatcher so no tokenizer, normalizer, or transform output can
/// overwrite it.
pub const ORIGINAL_STRING_KEY: &str = "original_string";
