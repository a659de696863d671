//! Build configuration, loaded from TOML.
//!
//! ```toml
//! output_dir = "out"
//!
//! [store]
//! data_file = "db.tpd"
//! index_file = "db.tpi"
//! sync = false
//! ```

use serde::Deserialize;
use std::{
    fs,
    path::{Component, Path, PathBuf},
};
use thiserror::Error as ThisError;

pub const DEFAULT_DATA_FILE: &str = "db.tpd";
pub const DEFAULT_INDEX_FILE: &str = "db.tpi";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ConfigError {
    #[error("invalid build config: {0}")]
    Invalid(String),

    #[error("failed to read build config '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse build config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// BuildConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub store: StoreConfig,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            store: StoreConfig::default(),
        }
    }
}

impl BuildConfig {
    /// Build config writing into `output_dir` with default store names.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            store: StoreConfig::default(),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.store.validate()
    }
}

///
/// StoreConfig
/// File names of the two store artifacts and the flush policy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub data_file: String,
    pub index_file: String,

    /// fsync both artifacts on commit
    pub sync: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.to_string(),
            index_file: DEFAULT_INDEX_FILE.to_string(),
            sync: false,
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub fn data_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.data_file)
    }

    #[must_use]
    pub fn index_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.index_file)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, name) in [("data_file", &self.data_file), ("index_file", &self.index_file)] {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("store.{key} must not be empty")));
            }
            let mut components = Path::new(name).components();
            if !matches!(
                (components.next(), components.next()),
                (Some(Component::Normal(_)), None)
            ) {
                return Err(ConfigError::Invalid(format!(
                    "store.{key} must be a bare file name, got '{name}'"
                )));
            }
        }

        if self.data_file == self.index_file {
            return Err(ConfigError::Invalid(format!(
                "store.data_file and store.index_file are both '{}'",
                self.data_file
            )));
        }

        Ok(())
    }
}

///
/// TESTS
///
