//! Reads the optional YAML configuration file
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use serde::Deserialize;
use crate::display::{GlyphSet, Orientation};
use crate::session::RetryPolicy;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Settings for the board display and the interactive session. Every field may be left out of the
/// file.
///
/// ```yaml
/// glyphs: ascii
/// orientation: white
/// max-attempts: 5
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// How pieces and empty squares are drawn
    pub glyphs: GlyphSet,
    /// Which side is drawn at the bottom of the board
    pub orientation: Orientation,
    /// How many invalid entries in a row a prompt accepts before the session gives up. No limit
    /// when absent; 0 behaves like 1.
    pub max_attempts: Option<usize>,
}

impl Config {
    /// Parses a configuration from YAML text. A blank document gives the defaults.
    pub fn from_yaml(s: &str) -> Result<Config, ConfigError> {
        if s.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(s)?)
    }

    /// Reads the configuration file at `path`
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let s = read_to_string(path)
            .map_err(|err| ConfigError(format!("{}: {}", path.display(), err)))?;
        Self::from_yaml(&s).map_err(|err| ConfigError(format!("{}: {}", path.display(), err)))
    }

    /// The file read when no path is given: `config.yaml` in the `.fenboard` directory under the
    /// user's home directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".fenboard").join("config.yaml"))
    }

    /// Loads `path` if given. Otherwise loads the default file if it exists, or returns the
    /// defaults.
    pub fn discover(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(ref path) if path.is_file() => Self::load(path),
                _ => Ok(Config::default()),
            },
        }
    }

    /// The retry policy described by `max_attempts`
    pub fn retry_policy(&self) -> RetryPolicy {
        match self.max_attempts {
            Some(n) => RetryPolicy::Bounded(n),
            None => RetryPolicy::Unbounded,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A configuration file that could not be read or parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError { }

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError(err.to_string())
    }
}
