//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Prefix for environment variable overrides (`SCOSTAMENTI__ANALYSIS__TOLERANCE`).
pub const ENV_PREFIX: &str = "SCOSTAMENTI";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Analysis engine configuration.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Input and output locations.
    #[serde(default)]
    pub data: DataConfig,
    /// Report cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analysis engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Relative tolerance used by the reconciliation checks.
    #[serde(default = "default_tolerance")]
    pub tolerance: Decimal,
    /// Decimal places used when exporting figures for presentation.
    #[serde(default = "default_output_decimal_places")]
    pub output_decimal_places: u32,
}

fn default_tolerance() -> Decimal {
    Decimal::new(1, 6)
}

fn default_output_decimal_places() -> u32 {
    2
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            output_decimal_places: default_output_decimal_places(),
        }
    }
}

/// Input and output locations.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory holding the seven input datasets.
    #[serde(default = "default_input_dir")]
    pub input_dir: String,
    /// Directory the exported tables are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_input_dir() -> String {
    "data".to_string()
}

fn default_output_dir() -> String {
    "export".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
        }
    }
}

/// Report cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached reports.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Time-to-live of a cached report in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_max_capacity() -> u64 {
    16
}

fn default_ttl_secs() -> u64 {
    3600 // 1 hour
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "scostamenti=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files under `config/`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Loads configuration from `{dir}/default` and `{dir}/{RUN_MODE}`, then
    /// applies `SCOSTAMENTI__*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file is malformed or a value has the wrong type.
    pub fn load_from(dir: &str) -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.analysis.tolerance, dec!(0.000001));
        assert_eq!(config.analysis.output_decimal_places, 2);
        assert_eq!(config.data.input_dir, "data");
        assert_eq!(config.data.output_dir, "export");
        assert_eq!(config.cache.max_capacity, 16);
        assert_eq!(config.cache.ttl_secs, 3600);
        assert_eq!(config.logging.filter, "scostamenti=info");
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        temp_env::with_vars_unset(
            [
                "SCOSTAMENTI__ANALYSIS__OUTPUT_DECIMAL_PLACES",
                "SCOSTAMENTI__DATA__INPUT_DIR",
            ],
            || {
                let config = AppConfig::load_from("does-not-exist").unwrap();
                assert_eq!(config.analysis.output_decimal_places, 2);
                assert_eq!(config.data.input_dir, "data");
            },
        );
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                ("SCOSTAMENTI__ANALYSIS__OUTPUT_DECIMAL_PLACES", Some("4")),
                ("SCOSTAMENTI__DATA__INPUT_DIR", Some("/srv/uploads")),
                ("SCOSTAMENTI__CACHE__TTL_SECS", Some("60")),
            ],
            || {
                let config = AppConfig::load_from("does-not-exist").unwrap();
                assert_eq!(config.analysis.output_decimal_places, 4);
                assert_eq!(config.data.input_dir, "/srv/uploads");
                assert_eq!(config.cache.ttl_secs, 60);
                assert_eq!(config.cache.max_capacity, 16);
            },
        );
    }
}
