// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::error::{DataRunError, Result};

/// How sparse runs (zero-width offset field) are materialised by the carver.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SparsePolicy {
    /// Read the clusters at the unchanged LCN, like any other run.
    #[default]
    Copy,
    /// Emit zero bytes; holes have no physical backing.
    ZeroFill,
}

/// Carving configuration, optionally loaded from a TOML file.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Volume cluster size in bytes.
    #[serde(default = "default_cluster_size")]
    pub cluster_size: u32,
    /// Where the reconstructed file is written.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Treatment of sparse runs while carving.
    #[serde(default)]
    pub sparse: SparsePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cluster_size: default_cluster_size(),
            output: default_output(),
            sparse: SparsePolicy::default(),
        }
    }
}

fn default_cluster_size() -> u32 { 4096 }
fn default_output() -> PathBuf { PathBuf::from("reconstructed_file.bin") }

impl Config {
    /// Load configuration from a TOML file at `path`.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DataRunError::Config(format!("Cannot read config file: {e}")))?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| DataRunError::Config(format!("Invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cluster_size == 0 {
            return Err(DataRunError::Config("cluster_size must be > 0".into()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(DataRunError::Config("output path must not be empty".into()));
        }
        Ok(())
    }
}
