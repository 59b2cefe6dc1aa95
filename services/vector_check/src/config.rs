//! Service configuration.
//!
//! Layered with `config`: built-in defaults, then an optional TOML file, then
//! `EPOCH_`-prefixed environment variables. Nested keys use a double
//! underscore, e.g. `EPOCH_TRANSPORT__OFFER_MAX_ATTEMPTS=3`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config_crate::{Config, Environment, File, FileFormat};
use network::ManagedTransportConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ENV_PREFIX: &str = "EPOCH";
pub const DEFAULT_VECTOR_FILE: &str = "test-vectors/epoch_vector_v1.txt";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorCheckConfig {
    /// Fallback filter when `RUST_LOG` is unset
    pub log_level: String,
    pub vector_file: PathBuf,
    pub transport: ManagedTransportConfig,
    pub replay: ReplaySettings,
}

impl Default for VectorCheckConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            vector_file: PathBuf::from(DEFAULT_VECTOR_FILE),
            transport: ManagedTransportConfig::default(),
            replay: ReplaySettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaySettings {
    /// Frames the loopback channel holds before pushing back
    pub loopback_capacity: usize,
    /// `max_fragments` passed to each poll while draining
    pub poll_batch: usize,
}

impl Default for ReplaySettings {
    fn default() -> Self {
        Self {
            loopback_capacity: 1024,
            poll_batch: 64,
        }
    }
}

impl VectorCheckConfig {
    /// Load from `path` (if given) with process environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    pub fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        builder = builder.add_source(env);

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config
            .transport
            .validate()
            .context("Invalid transport configuration")?;
        Ok(config)
    }
}

/// `EPOCH_` environment source.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config_crate::Map;
    use network::IdleStrategyKind;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = VectorCheckConfig::load_with_env(None, env(&[])).unwrap();
        assert_eq!(config, VectorCheckConfig::default());
        assert_eq!(config.transport.offer_max_attempts(), 10);
        assert_eq!(config.transport.fragment_limit(), 64);
    }

    #[test]
    fn test_file_values() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
vector_file = "vectors/custom.txt"

[transport]
offer_max_attempts = 3

[transport.idle_strategy]
type = "sleep_backoff"
min_sleep_us = 5
max_sleep_us = 50

[replay]
loopback_capacity = 2
"#
        )
        .unwrap();

        let config = VectorCheckConfig::load_with_env(Some(file.path()), env(&[])).unwrap();
        assert_eq!(config.vector_file, PathBuf::from("vectors/custom.txt"));
        assert_eq!(config.transport.offer_max_attempts(), 3);
        assert_eq!(config.transport.fragment_limit(), 64);
        assert_eq!(
            config.transport.idle_strategy,
            IdleStrategyKind::SleepBackoff {
                min_sleep_us: 5,
                max_sleep_us: 50
            }
        );
        assert_eq!(config.replay.loopback_capacity, 2);
        assert_eq!(config.replay.poll_batch, 64);
    }

    #[test]
    fn test_environment_overrides() {
        let config = VectorCheckConfig::load_with_env(
            None,
            env(&[
                ("EPOCH_TRANSPORT__FRAGMENT_LIMIT", "8"),
                ("EPOCH_LOG_LEVEL", "debug"),
            ]),
        )
        .unwrap();
        assert_eq!(config.transport.fragment_limit(), 8);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_non_positive_limits_use_defaults() {
        let config = VectorCheckConfig::load_with_env(
            None,
            env(&[
                ("EPOCH_TRANSPORT__FRAGMENT_LIMIT", "0"),
                ("EPOCH_TRANSPORT__OFFER_MAX_ATTEMPTS", "-4"),
            ]),
        )
        .unwrap();
        assert_eq!(config.transport.fragment_limit(), 64);
        assert_eq!(config.transport.offer_max_attempts(), 10);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result =
            VectorCheckConfig::load_with_env(Some(Path::new("/no/such/config.toml")), env(&[]));
        assert!(result.is_err());
    }
}
