//! `insular.toml` handling
//!
//! One file per site, every table optional:
//!
//! ```toml
//! [reveal]
//! duration = 0.9
//!
//! [trail]
//! particles = false
//!
//! [theme]
//! body_background = "rgb(16, 16, 33)"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use insular_reveal::RevealConfig;
use insular_theme::ThemeState;
use insular_trail::TrailConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const CONFIG_FILE: &str = "insular.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InsularConfig {
    pub reveal: RevealConfig,
    pub trail: TrailConfig,
    pub theme: ThemeState,
}

impl InsularConfig {
    /// Path of the config file in `dir`, if there is one
    pub fn find(dir: &Path) -> Option<PathBuf> {
        let path = dir.join(CONFIG_FILE);
        path.is_file().then_some(path)
    }

    /// Load `insular.toml` from `dir`, or the defaults when it is absent
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        match Self::find(dir) {
            Some(path) => Self::load(&path),
            None => {
                debug!("No {} in {}, using defaults", CONFIG_FILE, dir.display());
                Ok(Self::default())
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
