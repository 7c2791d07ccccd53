//! User configuration, read from `~/.taskplotrc`:
//!
//! ```toml
//! [colors]
//! GYM = "green"
//! WORK = "#1f77b4"
//! ```

use crate::chart::named_color;
use crate::{Result, TaskPlotError};
use log::debug;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_FILE_NAME: &str = ".taskplotrc";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// task name -> colour name or `#rrggbb`
    pub colors: BTreeMap<String, String>,
}

impl Config {
    /// `~/.taskplotrc`, None when the home directory is unknown
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME))
    }

    /// A missing file is the default configuration.
    pub fn load(path: &Path) -> Result<Config> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                debug!("reading configuration {}", path.display());
                text.parse()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no configuration at {}, using defaults", path.display());
                Ok(Config::default())
            }
            Err(e) => Err(TaskPlotError::io(path, e)),
        }
    }

    /// the configured colours, checked and lowercased
    pub fn color_map(&self) -> Result<BTreeMap<String, String>> {
        let mut map = BTreeMap::new();
        for (task, color) in &self.colors {
            if named_color(color).is_none() {
                return Err(TaskPlotError::Config(format!(
                    "unknown color '{}' for task '{}'",
                    color, task
                )));
            }
            map.insert(task.clone(), color.trim().to_ascii_lowercase());
        }
        Ok(map)
    }
}

impl FromStr for Config {
    type Err = TaskPlotError;

    fn from_str(s: &str) -> Result<Config> {
        toml::from_str(s).map_err(|e| TaskPlotError::Config(e.to_string()))
    }
}
