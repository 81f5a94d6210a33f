pub mod api;
pub mod manager;
pub mod matcher;
pub mod model;

pub use api::{Ec2SecurityGroupApi, SecurityGroupApi};
pub use manager::RuleManager;
pub use matcher::{RULE_DESCRIPTION_MARKER, is_eligible, stale_rules};
pub use model::{ManagedRule, RuleUpdate};
