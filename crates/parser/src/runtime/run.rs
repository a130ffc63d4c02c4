//! Run — line-by-line parse loop from stdin to stdout.

use std::io::{self, BufRead, Write};

use tracing::error;

use crate::conf::ParserConfig;
use crate::parser::Dispatcher;

/// Read frames line-by-line, parse each independently, and emit one JSON
/// object per record. A failed line is logged and dropped; acknowledgement
/// and retry belong to the host pipeline, not this harness.
pub fn run(dispatcher: &Dispatcher, config: &ParserConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }

        match dispatcher.parse(line.as_bytes()) {
            Ok(Some(record)) => {
                if config.pretty_print {
                    writeln!(out, "{}", record.to_pretty_string())?;
                } else {
                    writeln!(out, "{}", record)?;
                }
            }
            Ok(None) => {}
            Err(failure) => {
                error!("dropping line: {} ({})", failure, failure.cause);
            }
        }
    }

    Ok(())
}
