pub mod resolver;

pub use resolver::{DnsResolver, ResolvedRange, SystemDnsResolver, resolve_range};
