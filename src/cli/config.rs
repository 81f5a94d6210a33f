use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::DdnsError;

/// Optional defaults for the CLI, overridden by flags
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct ConfigFile {
    /// Target DDNS hostname
    #[serde(default)]
    pub hostname: Option<String>,
    /// AWS region of the security groups
    #[serde(default)]
    pub region: Option<String>,
    /// Security group IDs to manage
    #[serde(default)]
    pub security_group_ids: Vec<String>,
}

impl ConfigFile {
    /// Load configuration file
    pub fn load(path: &Path) -> Result<Self, DdnsError> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| DdnsError::ConfigParse {
            path: PathBuf::from(path),
            source,
        })
    }
}
