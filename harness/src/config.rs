//! Harness configuration: one world and one strategy, loaded from JSON.
//!
//! ```json
//! {
//!   "world": {"grid": {"rows": ["S..", "..G"]}},
//!   "strategy": {"beam": {"width": 2, "depth": 3}}
//! }
//! ```
//!
//! Loading is fail-closed: unknown fields, an inconsistent world or an
//! invalid policy are rejected before any search runs.

use std::path::{Path, PathBuf};

use lodestar_search::error::SearchError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::report::RunReportV1;
use crate::runner::{run_strategy, RunError, StrategyV1};
use crate::worlds::{WorldError, WorldSpecV1};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfigV1 {
    pub world: WorldSpecV1,
    pub strategy: StrategyV1,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config JSON does not parse: {detail}")]
    Parse { detail: String },
    #[error(transparent)]
    World(#[from] WorldError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl HarnessConfigV1 {
    /// Build the world and check the strategy without running anything.
    ///
    /// # Errors
    ///
    /// [`ConfigError::World`] or [`ConfigError::Search`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.build()?;
        self.strategy.validate()?;
        Ok(())
    }

    /// Build the world and run the strategy over it.
    ///
    /// # Errors
    ///
    /// Any [`RunError`].
    pub fn run(&self) -> Result<RunReportV1, RunError> {
        let world = self.world.build()?;
        run_strategy(&world, &self.strategy)
    }
}

/// Parse and validate a config from JSON text.
///
/// # Errors
///
/// [`ConfigError::Parse`] for malformed JSON or unknown fields, otherwise as
/// [`HarnessConfigV1::validate`].
pub fn parse_config(text: &str) -> Result<HarnessConfigV1, ConfigError> {
    let config: HarnessConfigV1 = serde_json::from_str(text).map_err(|e| ConfigError::Parse {
        detail: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a config file.
///
/// # Errors
///
/// [`ConfigError::Io`] if the file cannot be read, otherwise as
/// [`parse_config`].
pub fn load_config(path: &Path) -> Result<HarnessConfigV1, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text)
}
