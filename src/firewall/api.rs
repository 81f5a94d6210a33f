use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_ec2::{
    Client,
    config::Region,
    types::{Filter, SecurityGroupRule, SecurityGroupRuleRequest, SecurityGroupRuleUpdate},
};

#[cfg(test)]
use mockall::automock;

use super::model::{ManagedRule, RuleUpdate};
use crate::error::DdnsError;

/// Security group rule operations of the cloud provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SecurityGroupApi: Send + Sync + 'static {
    /// List every rule of `group_id`, filtered server-side by group
    async fn list_rules(&self, group_id: &str) -> Result<Vec<ManagedRule>, DdnsError>;

    /// Apply all `updates` to `group_id` in one batched call
    async fn modify_rules(
        &self,
        group_id: &str,
        updates: Vec<RuleUpdate>,
    ) -> Result<(), DdnsError>;
}

/// [`SecurityGroupApi`] backed by the EC2 API
#[derive(Clone, Debug)]
pub struct Ec2SecurityGroupApi {
    client: Client,
}

impl Ec2SecurityGroupApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client for `region` using the ambient AWS credentials
    pub async fn from_region(region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self::new(Client::new(&sdk_config))
    }
}

#[async_trait]
impl SecurityGroupApi for Ec2SecurityGroupApi {
    async fn list_rules(&self, group_id: &str) -> Result<Vec<ManagedRule>, DdnsError> {
        let filter = Filter::builder().name("group-id").values(group_id).build();

        let mut rules = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .client
                .describe_security_group_rules()
                .filters(filter.clone())
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|err| DdnsError::ListRules {
                    group_id: group_id.to_string(),
                    source: Box::new(aws_sdk_ec2::Error::from(err)),
                })?;

            rules.extend(output.security_group_rules().iter().map(to_managed_rule));

            match output.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        log::debug!("Listed {} rules in {}", rules.len(), group_id);
        Ok(rules)
    }

    async fn modify_rules(
        &self,
        group_id: &str,
        updates: Vec<RuleUpdate>,
    ) -> Result<(), DdnsError> {
        let requests: Vec<SecurityGroupRuleUpdate> =
            updates.into_iter().map(to_sdk_update).collect();

        self.client
            .modify_security_group_rules()
            .group_id(group_id)
            .set_security_group_rules(Some(requests))
            .send()
            .await
            .map_err(|err| DdnsError::ModifyRules {
                group_id: group_id.to_string(),
                source: Box::new(aws_sdk_ec2::Error::from(err)),
            })?;

        Ok(())
    }
}

fn to_managed_rule(rule: &SecurityGroupRule) -> ManagedRule {
    ManagedRule {
        rule_id: rule.security_group_rule_id().unwrap_or_default().to_string(),
        group_id: rule.group_id().map(String::from),
        protocol: rule.ip_protocol().map(String::from),
        from_port: rule.from_port(),
        to_port: rule.to_port(),
        cidr_ipv4: rule.cidr_ipv4().map(String::from),
        description: rule.description().map(String::from),
    }
}

fn to_sdk_update(update: RuleUpdate) -> SecurityGroupRuleUpdate {
    let request = SecurityGroupRuleRequest::builder()
        .set_ip_protocol(update.protocol)
        .set_from_port(update.from_port)
        .set_to_port(update.to_port)
        .set_description(update.description)
        .cidr_ipv4(update.cidr_ipv4)
        .build();

    SecurityGroupRuleUpdate::builder()
        .security_group_rule_id(update.rule_id)
        .security_group_rule(request)
        .build()
}
