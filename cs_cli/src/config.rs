//! CLI configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use courtside::EngineConfig;
use std::path::PathBuf;

/// Slow-run warning threshold when `COURTSIDE_SLOW_RUN_MS` is unset
const DEFAULT_SLOW_RUN_MS: u64 = 1000;

/// Complete CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Tournament snapshot to load
    pub snapshot_path: PathBuf,
    /// Engine tunables
    pub engine: EngineConfig,
    /// Engine runs slower than this are logged as warnings
    pub slow_run_ms: u64,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `snapshot_override` - Optional snapshot path (from `--input`)
    ///
    /// # Returns
    ///
    /// * `Result<CliConfig, ConfigError>` - Loaded configuration or error
    ///
    /// # Errors
    ///
    /// Returns error if no snapshot path is given on the command line or in
    /// `COURTSIDE_SNAPSHOT`
    pub fn from_env(snapshot_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        let snapshot_path = snapshot_override
            .or_else(|| std::env::var("COURTSIDE_SNAPSHOT").ok().map(PathBuf::from))
            .ok_or_else(|| ConfigError::MissingRequired {
                var: "COURTSIDE_SNAPSHOT".to_string(),
                hint: "Pass --input <FILE> or set it in .env".to_string(),
            })?;

        Ok(CliConfig {
            snapshot_path,
            engine: EngineConfig::from_env(),
            slow_run_ms: parse_env_or("COURTSIDE_SLOW_RUN_MS", DEFAULT_SLOW_RUN_MS),
        })
    }

    /// Validate configuration after loading
    ///
    /// # Returns
    ///
    /// * `Result<(), ConfigError>` - Success or validation error
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.snapshot_path.is_file() {
            return Err(ConfigError::Invalid {
                var: "COURTSIDE_SNAPSHOT".to_string(),
                reason: format!("{} is not a readable file", self.snapshot_path.display()),
            });
        }

        self.engine.validate().map_err(|e| ConfigError::Invalid {
            var: "COURTSIDE_*".to_string(),
            reason: e.to_string(),
        })?;

        if self.slow_run_ms == 0 {
            return Err(ConfigError::Invalid {
                var: "COURTSIDE_SLOW_RUN_MS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside::SchedulingConstraints;
    use tempfile::NamedTempFile;

    fn config_for(path: PathBuf) -> CliConfig {
        CliConfig {
            snapshot_path: path,
            engine: EngineConfig::default(),
            slow_run_ms: DEFAULT_SLOW_RUN_MS,
        }
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingRequired {
            var: "COURTSIDE_SNAPSHOT".to_string(),
            hint: "Pass --input".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("COURTSIDE_SNAPSHOT"));
        assert!(msg.contains("Pass --input"));
    }

    #[test]
    fn test_override_wins() {
        let file = NamedTempFile::new().unwrap();
        let config = CliConfig::from_env(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.snapshot_path, file.path());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path().join("absent.json"));

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_validation_bad_working_hours() {
        let file = NamedTempFile::new().unwrap();
        let mut config = config_for(file.path().to_path_buf());
        config.engine.scheduling = SchedulingConstraints {
            working_hours_start: 22,
            working_hours_end: 8,
            ..SchedulingConstraints::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("COURTSIDE_*"));
    }

    #[test]
    fn test_validation_zero_slow_threshold() {
        let file = NamedTempFile::new().unwrap();
        let mut config = config_for(file.path().to_path_buf());
        config.slow_run_ms = 0;

        assert!(config.validate().is_err());
    }
}
