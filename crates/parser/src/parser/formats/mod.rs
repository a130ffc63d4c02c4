/// Individual wire-format tokenizers

pub mod csv;
pub mod syslog;

// Re-export tokenizer implementations
pub use csv::CsvTokenizer;
pub use syslog::SyslogTokenizer;
