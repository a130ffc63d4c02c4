//! Boot — logging init and dispatcher construction.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::ParserConfig;
use crate::parser::Dispatcher;

/// Initialise the tracing / logging subsystem.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parser=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load config and build the dispatcher.
///
/// Returns `(Dispatcher, ParserConfig)` on success.
pub fn boot() -> Result<(Dispatcher, ParserConfig), Box<dyn std::error::Error>> {
    let config = ParserConfig::load()?;
    info!(
        "Configured {} stream parser (normalize={}, transform_keys={})",
        config.stream_format, config.normalize_for_metron, config.transform_keys_for_metron
    );

    Ok((Dispatcher::new(config.clone()), config))
}
