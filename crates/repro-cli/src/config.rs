//! Configuration for the repro CLI

use repro_codegen::CodegenConfig;
use serde::{Deserialize, Serialize};

/// Main CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Script generation settings
    #[serde(default)]
    pub codegen: CodegenConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl CliConfig {
    /// Load configuration from file
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        // Add default configuration
        builder = builder.add_source(config::Config::try_from(&CliConfig::default())?);

        // Add file configuration if provided
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        // Add environment variables with REPRO_ prefix, e.g. REPRO_CODEGEN__DEFAULT_YEAR
        builder = builder.add_source(
            config::Environment::with_prefix("REPRO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repro_codegen::Year;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.codegen.default_year, Year(2024));
        assert_eq!(config.logging.level, "warn");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_load_without_file() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config.codegen.us_regions, vec!["us", "enhanced_us"]);
        assert_eq!(config.codegen.earning_axis.count, 200);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[codegen]\ndefault_year = 2026\n\n[logging]\nlevel = \"debug\""
        )
        .unwrap();

        let config = CliConfig::load(file.path().to_str()).unwrap();
        assert_eq!(config.codegen.default_year, Year(2026));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.codegen.output_variable, "household_net_income");
    }
}
