//! User configuration.
//!
//! Read once at start-up from `<config_dir>/promptbox/config.toml`, or from
//! the file named by `PROMPTBOX_CONFIG`. A missing file means defaults; a
//! file that exists but does not parse is an error.

use crate::error::{PromptBoxError, Result};
use crate::models::seed::sample_prompts;
use crate::models::{IdScheme, PromptModel, PromptStore};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "PROMPTBOX_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Start with the sample catalog instead of an empty one
    pub load_examples: bool,
    pub id_scheme: IdScheme,
    /// Model preselected in the new-prompt form
    #[serde(deserialize_with = "deserialize_model")]
    pub default_model: PromptModel,
    /// Clipboard program and arguments; empty means platform default
    pub clipboard_command: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            load_examples: true,
            id_scheme: IdScheme::default(),
            default_model: PromptModel::default(),
            clipboard_command: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Loads from the default location, falling back to defaults when no
    /// file exists.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("no config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(PromptBoxError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&content).map_err(|source| PromptBoxError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Starting catalog for this configuration
    pub fn build_store(&self) -> PromptStore {
        let ids = self.id_scheme.build();
        if self.load_examples {
            PromptStore::with_prompts(sample_prompts(), ids)
        } else {
            PromptStore::new(ids)
        }
    }

    pub fn path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("promptbox").join("config.toml"))
    }
}

fn deserialize_model<'de, D>(deserializer: D) -> std::result::Result<PromptModel, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}
