//! @acp:module "Configuration"
//! @acp:summary "Scaffold configuration loading and defaults"
//! @acp:domain cli
//! @acp:layer config

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::migrate::MigrationOptions;

/// Default location of the configuration file
pub const CONFIG_FILE: &str = ".scaffold.config.json";

fn default_answers_file() -> PathBuf {
    PathBuf::from(".create-adapter.json")
}

/// @acp:summary "Main scaffold configuration structure"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Ask expert-only questions during `init`
    #[serde(default)]
    pub expert: bool,

    /// Where resolved answers are written
    #[serde(default = "default_answers_file")]
    pub answers_file: PathBuf,

    /// Migration session settings
    #[serde(default)]
    pub migration: MigrationOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            expert: false,
            answers_file: default_answers_file(),
            migration: MigrationOptions::default(),
        }
    }
}

impl Config {
    /// @acp:summary "Load config from a JSON file"
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from `path` if it exists; a present but malformed file is an error
    pub fn load_if_exists<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
