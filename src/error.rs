use thiserror::Error;

use std::{path::PathBuf, time::Duration};

use hickory_resolver::ResolveError;

/// Boxed error reported by the cloud provider SDK
pub type CloudError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum DdnsError {
    #[error("no {name} specified")]
    MissingConfig { name: &'static str },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to initialize DNS resolver: {source}")]
    DnsResolverInit {
        #[source]
        source: ResolveError,
    },

    #[error("failed to resolve hostname {hostname}: {source}")]
    DnsLookup {
        hostname: String,
        #[source]
        source: ResolveError,
    },

    #[error("hostname {hostname} did not resolve to any IPv4 address")]
    NoAddresses { hostname: String },

    #[error("failed to list rules of security group {group_id}: {source}")]
    ListRules {
        group_id: String,
        #[source]
        source: CloudError,
    },

    #[error("failed to modify rules of security group {group_id}: {source}")]
    ModifyRules {
        group_id: String,
        #[source]
        source: CloudError,
    },

    #[error("update did not finish within {}s", after.as_secs())]
    Timeout { after: Duration },

    #[error("update interrupted")]
    Interrupted,

    #[error("failed to listen for Ctrl-C: {0}")]
    Signal(#[source] std::io::Error),
}

impl DdnsError {
    /// Whether the error was raised while building configuration, before any network call
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::MissingConfig { .. } | Self::ConfigParse { .. } | Self::Io(_)
        )
    }

    /// Process exit status for a failed CLI run: 2 for configuration errors, 1 otherwise
    pub fn exit_status(&self) -> u8 {
        if self.is_config_error() { 2 } else { 1 }
    }
}
