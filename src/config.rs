//! Prover configuration
//!
//! Loaded from a JSON file; every field has a default so partial files work.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::{DifficultyUnit, Engine, DEFAULT_NONCE_LEN};
use crate::logging::LogFormat;

/// Default resource when none is given
pub const DEFAULT_RESOURCE: &str = "hashcash";

/// Default difficulty in hex digits
pub const DEFAULT_DIFFICULTY: u32 = 3;

/// Default inclusive counter cap
pub const DEFAULT_MAX_ITERATIONS: u64 = 100_000_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File I/O error: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    InvalidFormat(#[from] serde_json::Error),

    #[error("nonce_len must be at least 1")]
    EmptyNonce,

    #[error("threads must be at least 1")]
    NoThreads,

    #[error("difficulty {difficulty} can never be met in {unit:?} units (max {max})")]
    UnreachableDifficulty {
        difficulty: u32,
        unit: DifficultyUnit,
        max: u32,
    },
}

/// Mining and logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProverConfig {
    /// What the stamps are minted for
    pub resource: String,
    /// Required leading zeros, in `unit`s
    pub difficulty: u32,
    /// Inclusive counter cap, `None` for unbounded
    pub max_iterations: Option<u64>,
    /// Nonce length in characters
    pub nonce_len: usize,
    /// Parallel workers, `None` for a single-threaded search
    pub threads: Option<usize>,
    /// Difficulty unit
    pub unit: DifficultyUnit,
    /// Tracing filter, e.g. `info` or `hashcash_core=debug`
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for ProverConfig {
    fn default() -> Self {
        Self {
            resource: DEFAULT_RESOURCE.to_string(),
            difficulty: DEFAULT_DIFFICULTY,
            max_iterations: Some(DEFAULT_MAX_ITERATIONS),
            nonce_len: DEFAULT_NONCE_LEN,
            threads: None,
            unit: DifficultyUnit::default(),
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl ProverConfig {
    /// Read a config file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Load `path` if given, else the default location if it exists, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load_from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Write the config as pretty JSON
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Reject settings that cannot produce a stamp
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nonce_len == 0 {
            return Err(ConfigError::EmptyNonce);
        }
        if self.threads == Some(0) {
            return Err(ConfigError::NoThreads);
        }

        let max = self.unit.max_difficulty();
        if self.difficulty > max {
            return Err(ConfigError::UnreachableDifficulty {
                difficulty: self.difficulty,
                unit: self.unit,
                max,
            });
        }

        Ok(())
    }

    /// Engine for the configured difficulty unit
    pub fn engine(&self) -> Engine {
        Engine::with_unit(self.unit)
    }
}

/// `<config dir>/hashcash/config.json`
#[cfg(feature = "cli")]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hashcash").join("config.json"))
}

#[cfg(not(feature = "cli"))]
pub fn default_config_path() -> Option<PathBuf> {
    None
}
