use std::env;

use crate::error::DdnsError;

pub const SECURITY_GROUP_IDS_VAR: &str = "SECURITY_GROUP_IDS";
pub const TARGET_HOSTNAME_VAR: &str = "TARGET_HOSTNAME";
pub const AWS_REGION_VAR: &str = "AWS_REGION";

/// Validated inputs of one update run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetConfig {
    security_group_ids: Vec<String>,
    region: String,
    hostname: String,
}

impl TargetConfig {
    /// Build a configuration, rejecting empty inputs
    ///
    /// Group identifiers keep their order; duplicates are kept as given.
    pub fn new(
        security_group_ids: Vec<String>,
        region: impl Into<String>,
        hostname: impl Into<String>,
    ) -> Result<Self, DdnsError> {
        let region = region.into();
        let hostname = hostname.into();

        if security_group_ids.is_empty() || security_group_ids.iter().any(|id| id.is_empty()) {
            return Err(DdnsError::MissingConfig {
                name: "security group IDs",
            });
        }
        if hostname.is_empty() {
            return Err(DdnsError::MissingConfig {
                name: "target hostname",
            });
        }
        if region.is_empty() {
            return Err(DdnsError::MissingConfig { name: "AWS region" });
        }

        Ok(Self {
            security_group_ids,
            region,
            hostname,
        })
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, DdnsError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DdnsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let security_group_ids = lookup(SECURITY_GROUP_IDS_VAR)
            .map(|raw| split_group_ids(&raw))
            .unwrap_or_default();
        if security_group_ids.is_empty() {
            return Err(DdnsError::MissingConfig {
                name: SECURITY_GROUP_IDS_VAR,
            });
        }

        let hostname = lookup(TARGET_HOSTNAME_VAR).unwrap_or_default();
        if hostname.is_empty() {
            return Err(DdnsError::MissingConfig {
                name: TARGET_HOSTNAME_VAR,
            });
        }

        let region = lookup(AWS_REGION_VAR).unwrap_or_default();
        if region.is_empty() {
            return Err(DdnsError::MissingConfig {
                name: AWS_REGION_VAR,
            });
        }

        Self::new(security_group_ids, region, hostname)
    }

    pub fn security_group_ids(&self) -> &[String] {
        &self.security_group_ids
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }
}

/// Split a comma-separated list, dropping blank segments
pub fn split_group_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn from_lookup_reads_all_variables() {
        let config = TargetConfig::from_lookup(lookup_from(&[
            (SECURITY_GROUP_IDS_VAR, "sg-a,sg-b"),
            (TARGET_HOSTNAME_VAR, "home.example.com"),
            (AWS_REGION_VAR, "eu-west-1"),
        ]))
        .unwrap();

        assert_eq!(config.security_group_ids(), ["sg-a", "sg-b"]);
        assert_eq!(config.hostname(), "home.example.com");
        assert_eq!(config.region(), "eu-west-1");
    }

    #[rstest]
    #[case(&[(TARGET_HOSTNAME_VAR, "h"), (AWS_REGION_VAR, "r")], SECURITY_GROUP_IDS_VAR)]
    #[case(&[(SECURITY_GROUP_IDS_VAR, " , ,"), (TARGET_HOSTNAME_VAR, "h"), (AWS_REGION_VAR, "r")], SECURITY_GROUP_IDS_VAR)]
    #[case(&[(SECURITY_GROUP_IDS_VAR, "sg-a"), (AWS_REGION_VAR, "r")], TARGET_HOSTNAME_VAR)]
    #[case(&[(SECURITY_GROUP_IDS_VAR, "sg-a"), (TARGET_HOSTNAME_VAR, ""), (AWS_REGION_VAR, "r")], TARGET_HOSTNAME_VAR)]
    #[case(&[(SECURITY_GROUP_IDS_VAR, "sg-a"), (TARGET_HOSTNAME_VAR, "h")], AWS_REGION_VAR)]
    fn from_lookup_reports_missing_variable(
        #[case] vars: &[(&str, &str)],
        #[case] expected: &str,
    ) {
        match TargetConfig::from_lookup(lookup_from(vars)) {
            Err(DdnsError::MissingConfig { name }) => assert_eq!(name, expected),
            other => panic!("expected MissingConfig, got {other:?}"),
        }
    }

    #[rstest]
    #[case("sg-a", vec!["sg-a"])]
    #[case("sg-a, sg-b", vec!["sg-a", "sg-b"])]
    #[case("sg-b,sg-a,sg-b", vec!["sg-b", "sg-a", "sg-b"])]
    #[case("sg-a,,sg-b,", vec!["sg-a", "sg-b"])]
    #[case("", vec![])]
    fn split_group_ids_keeps_order(#[case] raw: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_group_ids(raw), expected);
    }

    #[test]
    fn new_rejects_empty_group_list() {
        let err = TargetConfig::new(vec![], "us-east-1", "home.example.com").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn new_rejects_blank_group_id() {
        let result = TargetConfig::new(
            vec!["sg-a".to_string(), String::new()],
            "us-east-1",
            "home.example.com",
        );
        assert!(result.is_err());
    }
}
