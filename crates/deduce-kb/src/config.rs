//! Prover configuration.
//!
//! Saturation is not guaranteed to terminate on arbitrary first-order input, so
//! callers that need bounded latency set a round or clause cap here. The
//! configuration can be loaded from a TOML file:
//!
//! ```toml
//! max_rounds = 32
//! max_clauses = 20000
//! record_derivation = false
//! ```
//!
//! Search order for [`ProverConfig::load_default`]:
//! 1. `DEDUCE_CONFIG` environment variable
//! 2. `.deducerc` in the current directory

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LogicError, Result};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "DEDUCE_CONFIG";

/// Config file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".deducerc";

/// Limits and bookkeeping options for saturation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProverConfig {
    /// Maximum number of saturation rounds (None = unbounded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rounds: Option<usize>,

    /// Maximum number of clauses in the working set (None = unbounded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_clauses: Option<usize>,

    /// Keep parent links so a refutation can be replayed as a derivation
    pub record_derivation: bool,
}

impl Default for ProverConfig {
    fn default() -> Self {
        Self {
            max_rounds: None,
            max_clauses: None,
            record_derivation: true,
        }
    }
}

impl ProverConfig {
    /// Stop with a resource-limit error once `rounds` rounds have run.
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    /// Stop with a resource-limit error once the working set exceeds `clauses`.
    pub fn with_max_clauses(mut self, clauses: usize) -> Self {
        self.max_clauses = Some(clauses);
        self
    }

    pub fn with_derivation(mut self, enabled: bool) -> Self {
        self.record_derivation = enabled;
        self
    }

    /// Check if any cap is set.
    pub fn is_bounded(&self) -> bool {
        self.max_rounds.is_some() || self.max_clauses.is_some()
    }

    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| LogicError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Find and load configuration, falling back to defaults.
    ///
    /// A file that cannot be read or parsed is skipped with a warning.
    pub fn load_default() -> Self {
        let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::discover(from_env.as_deref(), Path::new("."))
    }

    /// Try `explicit`, then [`CONFIG_FILE_NAME`] in `dir`, then the defaults.
    fn discover(explicit: Option<&Path>, dir: &Path) -> Self {
        if let Some(path) = explicit {
            match Self::load(path) {
                Ok(config) => return config,
                Err(err) => tracing::warn!(%err, "ignoring prover config from {}", CONFIG_ENV_VAR),
            }
        }

        let local = dir.join(CONFIG_FILE_NAME);
        if local.exists() {
            match Self::load(&local) {
                Ok(config) => return config,
                Err(err) => tracing::warn!(%err, "ignoring {}", CONFIG_FILE_NAME),
            }
        }

        Self::default()
    }
}
