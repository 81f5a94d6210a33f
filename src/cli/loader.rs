use crate::config::TargetConfig;
use crate::error::DdnsError;

use super::args::Args;
use super::config::ConfigFile;

/// Merge command line arguments and config file into a target configuration
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the complete configuration from CLI arguments
    ///
    /// Flags and positional group IDs win over values from `--config`.
    pub fn load(args: &Args) -> Result<TargetConfig, DdnsError> {
        let file = match args.config.as_ref() {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        Self::merge(args, file)
    }

    fn merge(args: &Args, file: ConfigFile) -> Result<TargetConfig, DdnsError> {
        let security_group_ids = if args.security_group_ids.is_empty() {
            file.security_group_ids
        } else {
            args.security_group_ids.clone()
        };
        if security_group_ids.is_empty() {
            return Err(DdnsError::MissingConfig {
                name: "security groups",
            });
        }

        let hostname = args.hostname.clone().or(file.hostname).unwrap_or_default();
        if hostname.is_empty() {
            return Err(DdnsError::MissingConfig {
                name: "target hostname",
            });
        }

        let region = args.region.clone().or(file.region).unwrap_or_default();
        if region.is_empty() {
            return Err(DdnsError::MissingConfig { name: "AWS region" });
        }

        TargetConfig::new(security_group_ids, region, hostname)
    }
}
