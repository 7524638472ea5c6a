// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 simdeploy contributors

//! Tool and working-directory configuration
//!
//! Defaults match the conventional install locations; a `.simdeploy.yaml`
//! file can override any of them, which is also how tests point the pipeline
//! at stand-in tools.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::SimdeployError;

/// Default config file name, looked up in the current directory
pub const CONFIG_FILE: &str = ".simdeploy.yaml";

/// Name of the per-run extraction directory
pub const WORKING_DIR_NAME: &str = "ipa_extracted";

/// Paths to the external tools the pipeline invokes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    /// Archive extractor
    pub unzip: PathBuf,
    /// Bundle converter; fixed install location, never searched on PATH
    pub converter: PathBuf,
    /// Code signer
    pub codesign: PathBuf,
    /// Simulator control front-end
    pub xcrun: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            unzip: PathBuf::from("/usr/bin/unzip"),
            converter: PathBuf::from("/usr/local/bin/simforge"),
            codesign: PathBuf::from("/usr/bin/codesign"),
            xcrun: PathBuf::from("/usr/bin/xcrun"),
        }
    }
}

/// Configuration for a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tools: ToolPaths,
    /// Extraction directory, recreated fresh at the start of every run
    pub working_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tools: ToolPaths::default(),
            working_dir: default_working_dir(),
        }
    }
}

fn default_working_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(Path::to_path_buf))
        .unwrap_or_else(std::env::temp_dir)
        .join(WORKING_DIR_NAME)
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, SimdeployError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SimdeployError::FileReadError {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, SimdeployError> {
        serde_yaml::from_str(yaml).map_err(Into::into)
    }

    /// Serialize configuration to YAML
    pub fn to_yaml(&self) -> Result<String, SimdeployError> {
        serde_yaml::to_string(self).map_err(Into::into)
    }

    /// Load `.simdeploy.yaml` from the current directory if present,
    /// otherwise fall back to defaults
    pub fn discover() -> Result<Self, SimdeployError> {
        let candidate = PathBuf::from(CONFIG_FILE);
        if candidate.exists() {
            Self::from_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_conventional_tool_locations() {
        let config = Config::default();
        assert_eq!(config.tools.unzip, PathBuf::from("/usr/bin/unzip"));
        assert_eq!(config.tools.converter, PathBuf::from("/usr/local/bin/simforge"));
        assert!(config.working_dir.ends_with(WORKING_DIR_NAME));
    }

    #[test]
    fn test_partial_yaml_keeps_remaining_defaults() {
        let config = Config::from_yaml("tools:\n  converter: /opt/simforge\n").unwrap();
        assert_eq!(config.tools.converter, PathBuf::from("/opt/simforge"));
        assert_eq!(config.tools.codesign, PathBuf::from("/usr/bin/codesign"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut config = Config::default();
        config.working_dir = PathBuf::from("/tmp/work");

        let parsed = Config::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(parsed.working_dir, PathBuf::from("/tmp/work"));
        assert_eq!(parsed.tools.xcrun, config.tools.xcrun);
    }

    #[test]
    fn test_invalid_yaml_is_yaml_error() {
        let err = Config::from_yaml("tools: [not, a, map]").unwrap_err();
        assert!(matches!(err, SimdeployError::Yaml { .. }));
    }
}
