use crate::net::ResolvedRange;

/// Snapshot of one security group rule as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManagedRule {
    /// Opaque provider identifier, e.g. `sgr-0abc...`
    pub rule_id: String,
    /// Security group the provider reports the rule under
    pub group_id: Option<String>,
    pub protocol: Option<String>,
    pub from_port: Option<i32>,
    pub to_port: Option<i32>,
    /// IPv4 source/destination range; `None` for IPv6, prefix-list or group references
    pub cidr_ipv4: Option<String>,
    pub description: Option<String>,
}

/// Replacement of a rule's CIDR, applied in place by rule identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleUpdate {
    pub rule_id: String,
    pub protocol: Option<String>,
    pub from_port: Option<i32>,
    pub to_port: Option<i32>,
    pub description: Option<String>,
    pub cidr_ipv4: String,
}

impl RuleUpdate {
    /// Keep everything from `rule` except the CIDR, which becomes `target`
    pub fn retarget(rule: &ManagedRule, target: &ResolvedRange) -> Self {
        Self {
            rule_id: rule.rule_id.clone(),
            protocol: rule.protocol.clone(),
            from_port: rule.from_port,
            to_port: rule.to_port,
            description: rule.description.clone(),
            cidr_ipv4: target.as_str().to_string(),
        }
    }
}
