use std::{sync::Arc, time::Duration};

use crate::{
    config::TargetConfig,
    error::DdnsError,
    firewall::{Ec2SecurityGroupApi, RuleManager, SecurityGroupApi},
    net::{DnsResolver, SystemDnsResolver, resolve_range},
};

/// Resolves the target hostname and points every configured group at it
pub struct Updater<R: DnsResolver, A: SecurityGroupApi> {
    config: TargetConfig,
    resolver: R,
    rules: RuleManager<A>,
}

impl Updater<SystemDnsResolver, Ec2SecurityGroupApi> {
    /// Wire the system resolver and an EC2 client for the configured region
    pub async fn connect(config: TargetConfig) -> Result<Self, DdnsError> {
        let resolver = SystemDnsResolver::new()?;
        let api = Ec2SecurityGroupApi::from_region(config.region()).await;
        Ok(Self::new(config, resolver, Arc::new(api)))
    }
}

impl<R: DnsResolver, A: SecurityGroupApi> Updater<R, A> {
    pub fn new(config: TargetConfig, resolver: R, api: Arc<A>) -> Self {
        Self {
            config,
            resolver,
            rules: RuleManager::new(api),
        }
    }

    pub fn config(&self) -> &TargetConfig {
        &self.config
    }

    /// Run one update and return the total number of rules rewritten
    ///
    /// The hostname is resolved once, then groups are processed in configured order.
    /// The first error stops the run; groups after it are not visited.
    pub async fn update(&self) -> Result<usize, DdnsError> {
        let target = resolve_range(&self.resolver, self.config.hostname()).await?;
        log::info!("Target CIDR for {} is {}", self.config.hostname(), target);

        let mut updated = 0;
        for group_id in self.config.security_group_ids() {
            log::info!("Managing security group {}", group_id);
            updated += self.rules.apply(group_id, &target).await?;
        }

        Ok(updated)
    }

    /// Run [`Updater::update`], abandoning it once `timeout` elapses
    pub async fn update_within(&self, timeout: Duration) -> Result<usize, DdnsError> {
        tokio::time::timeout(timeout, self.update())
            .await
            .map_err(|_| DdnsError::Timeout { after: timeout })?
    }
}
