//! Settings for the `matstep` front end.
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use matstep_engine::render::DEFAULT_PRECISION;
use matstep_engine::{Engine, NumericPolicy};

/// Largest row or column count accepted by `create` unless overridden.
pub const DEFAULT_MAX_DIMENSION: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub policy: NumericPolicy,
    /// Decimals used when printing non-integer values.
    pub precision: usize,
    /// `None` lifts the limit.
    pub max_dimension: Option<usize>,
    pub show_steps: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            policy: NumericPolicy::default(),
            precision: DEFAULT_PRECISION,
            max_dimension: Some(DEFAULT_MAX_DIMENSION),
            show_steps: true,
        }
    }
}

impl CliConfig {
    /// Start from the `--config` file (or defaults) and apply command-line
    /// overrides on top.
    pub fn from_arguments(matches: &ArgMatches) -> Result<Self> {
        let mut config = match matches.get_one::<std::path::PathBuf>("config") {
            Some(path) => load_cli_config(path)?,
            None => CliConfig::default(),
        };

        if let Some(precision) = matches.get_one::<usize>("precision") {
            config.precision = *precision;
        }
        if let Some(epsilon) = matches.get_one::<f64>("epsilon") {
            config.policy = NumericPolicy::new(*epsilon)
                .with_context(|| format!("Invalid --epsilon: {}", epsilon))?;
        }
        if matches.get_flag("no_steps") {
            config.show_steps = false;
        }

        Ok(config)
    }

    pub fn engine(&self) -> Engine {
        Engine::new(self.policy)
    }
}

/// Load a front-end configuration from a JSON file.
pub fn load_cli_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: CliConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}
