//! Load — config loading from file and environment variables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::parser::StreamFormat;

use super::model::ParserConfig;

impl ParserConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = std::env::var("ADPARSER_CONFIG_FILE")
            .unwrap_or_else(|_| "/etc/adparser/parser.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!("Config file not found at {}, using environment variables", config_path);
            Self::from_env()
        };

        // Environment variables override file config
        if let Ok(format) = std::env::var("ADPARSER_STREAM_FORMAT") {
            config.stream_format = StreamFormat::from_selector(Some(&format));
        }
        if let Ok(normalize) = std::env::var("ADPARSER_NORMALIZE_FOR_METRON") {
            config.normalize_for_metron = normalize == "yes";
        }
        if let Ok(transform) = std::env::var("ADPARSER_TRANSFORM_KEYS_FOR_METRON") {
            config.transform_keys_for_metron = transform == "yes";
        }

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: ParserConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from environment variables with the same
    /// truthiness contract as the option map: `"yes"` enables, everything
    /// else disables.
    pub fn from_env() -> Self {
        Self {
            stream_format: StreamFormat::from_selector(
                std::env::var("ADPARSER_STREAM_FORMAT").ok().as_deref(),
            ),
            normalize_for_metron: env_yes("ADPARSER_NORMALIZE_FOR_METRON"),
            transform_keys_for_metron: env_yes("ADPARSER_TRANSFORM_KEYS_FOR_METRON"),
            pretty_print: env_yes("ADPARSER_PRETTY_PRINT"),
        }
    }
}

fn env_yes(name: &str) -> bool {
    std::env::var(name).map(|v| v == "yes").unwrap_or(false)
}
