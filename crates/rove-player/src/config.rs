//! Player configuration file
//!
//! The tuning sections of `RoveConfig` plus an optional `[bindings]` table:
//!
//! ```toml
//! [movement]
//! speed = 12.0
//!
//! [bindings]
//! jump = ["Space", "KeyJ"]
//! ```

use rove_core::{Result, RoveConfig};
use rove_runtime::InputBindings;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Everything the player binary reads from its config file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerConfig {
    pub tuning: RoveConfig,
    pub bindings: InputBindings,
}

#[derive(Deserialize)]
struct PlayerConfigFile {
    #[serde(flatten)]
    tuning: RoveConfig,
    #[serde(default)]
    bindings: Option<InputBindings>,
}

impl PlayerConfig {
    /// Read, parse and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse config text. Bindings in the file replace the default keys for
    /// the actions they name; other actions keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: PlayerConfigFile = toml::from_str(content)?;
        file.tuning.validate()?;

        let bindings = match file.bindings {
            Some(overrides) => InputBindings::with_overrides(&overrides),
            None => InputBindings::default(),
        };

        Ok(Self {
            tuning: file.tuning,
            bindings,
        })
    }

    /// Load `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
