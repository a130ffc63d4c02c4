// Module structure for the AD audit-line parser.

pub mod conf;
pub mod parser;
pub mod runtime;

pub use conf::ParserConfig;
pub use parser::{Dispatcher, ParsedRecord, StreamFormat};
