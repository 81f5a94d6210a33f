use std::sync::Arc;

use super::{api::SecurityGroupApi, matcher::stale_rules, model::RuleUpdate};
use crate::{error::DdnsError, net::ResolvedRange};

/// Points the marked rules of a security group at a target range
pub struct RuleManager<A: SecurityGroupApi> {
    api: Arc<A>,
}

impl<A: SecurityGroupApi> RuleManager<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Rewrite every stale managed rule of `group_id` to `target`
    ///
    /// Lists the group's rules, keeps the marked IPv4 rules whose CIDR differs from
    /// `target` and sends them as one batched modification. Returns the number of rules
    /// rewritten; zero means the group was already converged and nothing was sent.
    pub async fn apply(&self, group_id: &str, target: &ResolvedRange) -> Result<usize, DdnsError> {
        let rules = self.api.list_rules(group_id).await?;

        let stale = stale_rules(group_id, &rules, target);
        if stale.is_empty() {
            log::info!("No rules to update in {}", group_id);
            return Ok(0);
        }

        let updates: Vec<RuleUpdate> = stale
            .into_iter()
            .map(|rule| {
                log::info!(
                    "{} ({}-{}) {} -> {}",
                    rule.protocol.as_deref().unwrap_or("-"),
                    port_label(rule.from_port),
                    port_label(rule.to_port),
                    rule.cidr_ipv4.as_deref().unwrap_or_default(),
                    target
                );
                RuleUpdate::retarget(rule, target)
            })
            .collect();

        let count = updates.len();
        self.api.modify_rules(group_id, updates).await?;
        log::info!("Updated {} rules in {}", count, group_id);

        Ok(count)
    }
}

fn port_label(port: Option<i32>) -> String {
    port.map_or_else(|| "-".to_string(), |p| p.to_string())
}
