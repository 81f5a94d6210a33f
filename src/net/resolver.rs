use std::{
    fmt,
    net::{IpAddr, Ipv4Addr},
};

use async_trait::async_trait;
use hickory_resolver::{ResolveError, TokioResolver, config::LookupIpStrategy};

#[cfg(test)]
use mockall::automock;

use crate::error::DdnsError;

/// A single IPv4 address expressed as a `/32` CIDR range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRange {
    cidr: String,
}

impl ResolvedRange {
    pub fn new(addr: Ipv4Addr) -> Self {
        Self {
            cidr: format!("{addr}/32"),
        }
    }

    /// CIDR notation, e.g. `203.0.113.9/32`
    pub fn as_str(&self) -> &str {
        &self.cidr
    }
}

impl fmt::Display for ResolvedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cidr)
    }
}

/// DNS resolver abstraction for testing
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DnsResolver: Send + Sync + 'static {
    /// IPv4 addresses of `hostname`, in the order the resolver returned them
    async fn lookup_ipv4(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, DdnsError>;
}

/// Production DNS resolver using the system configuration
pub struct SystemDnsResolver {
    resolver: TokioResolver,
}

impl SystemDnsResolver {
    /// Build a resolver from `/etc/resolv.conf` and the hosts file, restricted to IPv4
    pub fn new() -> Result<Self, DdnsError> {
        let mut builder = TokioResolver::builder_tokio()
            .map_err(|source| DdnsError::DnsResolverInit { source })?;
        builder.options_mut().ip_strategy = LookupIpStrategy::Ipv4Only;

        Ok(Self {
            resolver: builder.build(),
        })
    }
}

#[async_trait]
impl DnsResolver for SystemDnsResolver {
    async fn lookup_ipv4(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, DdnsError> {
        let response = match self.resolver.lookup_ip(hostname).await {
            Ok(response) => response,
            Err(source) => return empty_answer(hostname, source),
        };

        Ok(response
            .iter()
            .filter_map(|ip| match ip {
                IpAddr::V4(v4) => Some(v4),
                IpAddr::V6(_) => None,
            })
            .collect())
    }
}

/// Map a failed lookup to an empty answer when the name exists but has no A records
///
/// NXDOMAIN and every other failure stay a [`DdnsError::DnsLookup`].
fn empty_answer(hostname: &str, source: ResolveError) -> Result<Vec<Ipv4Addr>, DdnsError> {
    if source.is_no_records_found() && !source.is_nx_domain() {
        log::debug!("{} has no A records: {}", hostname, source);
        return Ok(Vec::new());
    }

    Err(DdnsError::DnsLookup {
        hostname: hostname.to_string(),
        source,
    })
}

/// Resolve `hostname` to the `/32` range of its first IPv4 address
///
/// Only one lookup is attempted. When several addresses come back, the first one in
/// resolver order is used as-is. A successful lookup with no IPv4 answer is reported as
/// [`DdnsError::NoAddresses`].
pub async fn resolve_range<R: DnsResolver + ?Sized>(
    resolver: &R,
    hostname: &str,
) -> Result<ResolvedRange, DdnsError> {
    let addrs = resolver.lookup_ipv4(hostname).await?;

    addrs
        .first()
        .copied()
        .map(ResolvedRange::new)
        .ok_or_else(|| DdnsError::NoAddresses {
            hostname: hostname.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![Ipv4Addr::new(203, 0, 113, 9)], "203.0.113.9/32")]
    #[case(vec![Ipv4Addr::new(198, 51, 100, 7), Ipv4Addr::new(10, 0, 0, 1)], "198.51.100.7/32")]
    #[case(vec![Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(1, 1, 1, 1)], "10.0.0.1/32")]
    #[tokio::test]
    async fn resolve_range_uses_first_address(
        #[case] addrs: Vec<Ipv4Addr>,
        #[case] expected: &str,
    ) {
        let mut resolver = MockDnsResolver::new();
        resolver
            .expect_lookup_ipv4()
            .withf(|hostname| hostname == "home.example.com")
            .times(1)
            .returning(move |_| Ok(addrs.clone()));

        let range = resolve_range(&resolver, "home.example.com").await.unwrap();
        assert_eq!(range.as_str(), expected);
        assert_eq!(range.to_string(), expected);
    }

    #[tokio::test]
    async fn resolve_range_rejects_empty_answer() {
        let mut resolver = MockDnsResolver::new();
        resolver.expect_lookup_ipv4().returning(|_| Ok(vec![]));

        let result = resolve_range(&resolver, "empty.example.com").await;
        match result {
            Err(DdnsError::NoAddresses { hostname }) => assert_eq!(hostname, "empty.example.com"),
            other => panic!("expected NoAddresses, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn resolve_range_propagates_lookup_error() {
        let mut resolver = MockDnsResolver::new();
        resolver
            .expect_lookup_ipv4()
            .times(1)
            .returning(|_| Err(DdnsError::Interrupted));

        let result = resolve_range(&resolver, "home.example.com").await;
        assert!(matches!(result, Err(DdnsError::Interrupted)));
    }

    #[test]
    fn resolved_range_is_host_cidr() {
        let range = ResolvedRange::new(Ipv4Addr::new(192, 0, 2, 33));
        assert_eq!(range.as_str(), "192.0.2.33/32");
    }

    #[test]
    fn empty_answer_keeps_generic_failure() {
        let result = empty_answer("home.example.com", ResolveError::from("connection refused"));
        match result {
            Err(DdnsError::DnsLookup { hostname, .. }) => assert_eq!(hostname, "home.example.com"),
            other => panic!("expected DnsLookup, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn nonexistent_domain_stays_lookup_error() {
        // `.invalid` is answered NXDOMAIN locally, without a network round-trip.
        let resolver = SystemDnsResolver::new().unwrap();
        let result = resolver.lookup_ipv4("missing.invalid").await;
        match result {
            Err(DdnsError::DnsLookup { hostname, source }) => {
                assert_eq!(hostname, "missing.invalid");
                assert!(source.is_nx_domain());
            }
            other => panic!("expected DnsLookup, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_localhost() {
        let resolver = SystemDnsResolver::new().unwrap();
        let range = resolve_range(&resolver, "localhost").await.unwrap();
        assert_eq!(range.as_str(), "127.0.0.1/32");
    }
}
