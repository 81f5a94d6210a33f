use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Point AWS security group rules tagged @DDNS at the current address of a hostname"
)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Target DDNS hostname
    #[arg(long = "hostname", value_name = "HOST")]
    pub hostname: Option<String>,

    /// AWS region of the security groups
    #[arg(long = "region", value_name = "REGION")]
    pub region: Option<String>,

    /// Give up on the run after this many seconds
    #[arg(long = "timeout", value_name = "SECONDS", default_value_t = 60)]
    pub timeout: u64,

    /// Security group IDs to manage
    #[arg(value_name = "SECURITY_GROUP_ID")]
    pub security_group_ids: Vec<String>,
}
