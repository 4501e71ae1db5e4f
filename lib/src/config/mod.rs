//! Configuration for compiling patterns and matching them against trees.
//!
//! Settings are loaded from a TOML file with [`load_config_from_file`].

use std::path::Path;

use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Configuration for compiling patterns and running them over trees.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Compilation specific configuration.
    pub compile: CompileConfig,
    /// Engine specific configuration.
    pub engine: EngineConfig,
}

/// Compilation specific configuration.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CompileConfig {
    /// Remove epsilon transitions from compiled automata.
    pub eliminate_epsilon: bool,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self { eliminate_epsilon: true }
    }
}

/// Engine specific configuration.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// What to do when a derivation can be reconstructed in more than one
    /// way.
    pub ambiguity: Ambiguity,
}

/// Policy applied while backtracking when a step has more than one
/// possible predecessor.
#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Ambiguity {
    /// Pick the first predecessor in tuple order.
    #[default]
    First,
    /// Fail with [`crate::Error::AmbiguousDerivation`].
    Strict,
}

/// Load config file from a given path. Path must contain a valid TOML file or
/// this function will propagate the error. Settings missing from the file
/// keep their default values.
pub fn load_config_from_file(
    config_file: &Path,
) -> Result<Config, figment::Error> {
    let config: Config =
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file_exact(config_file))
            .extract()?;
    Ok(config)
}
