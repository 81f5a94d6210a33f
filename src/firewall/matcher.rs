use super::model::ManagedRule;
use crate::net::ResolvedRange;

/// Text a rule description must contain for the rule to be managed
pub const RULE_DESCRIPTION_MARKER: &str = "@DDNS";

/// Check whether a rule listed for `group_id` is opted into management
///
/// A rule qualifies when it has an IPv4 CIDR and its description contains
/// [`RULE_DESCRIPTION_MARKER`] (case-sensitive). Rules reported under another group
/// never qualify.
pub fn is_eligible(rule: &ManagedRule, group_id: &str) -> bool {
    if let Some(owner) = rule.group_id.as_deref()
        && owner != group_id
    {
        return false;
    }

    rule.cidr_ipv4.is_some()
        && rule
            .description
            .as_deref()
            .is_some_and(|description| description.contains(RULE_DESCRIPTION_MARKER))
}

/// Select the eligible rules that do not already point at `target`
///
/// CIDRs are compared as plain strings.
pub fn stale_rules<'a>(
    group_id: &str,
    rules: &'a [ManagedRule],
    target: &ResolvedRange,
) -> Vec<&'a ManagedRule> {
    rules
        .iter()
        .filter(|rule| is_eligible(rule, group_id))
        .filter(|rule| rule.cidr_ipv4.as_deref() != Some(target.as_str()))
        .collect()
}
