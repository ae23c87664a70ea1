//! User configuration, loaded through confy
//!
//! Every field has a default so a missing or partial file still loads.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tudu_core::{Category, Filter};

use crate::error::Result;

pub const APP_NAME: &str = "tudu";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the key-value files
    pub data_directory: PathBuf,
    /// Pending category when a session starts
    pub default_category: Category,
    /// Filter applied by `list` and the TUI unless overridden
    pub default_filter: String,
    /// Keep a `.bak` copy of the previous value on every write
    pub backup: bool,
}

impl Default for Config {
    fn default() -> Self {
        let data_directory = ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            data_directory,
            default_category: Category::Home,
            default_filter: Filter::All.to_string(),
            backup: true,
        }
    }
}

impl Config {
    /// Load from `path` when given, otherwise from the platform config dir
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let cfg = match path {
            Some(path) => confy::load_path(path)?,
            None => confy::load(APP_NAME, None)?,
        };
        Ok(cfg)
    }

    pub fn default_filter(&self) -> Filter {
        Filter::parse(&self.default_filter)
    }
}
