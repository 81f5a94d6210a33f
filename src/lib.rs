pub mod cli;
pub mod config;
pub mod error;
pub mod firewall;
pub mod lambda;
pub mod net;
pub mod updater;

/// Initialize `env_logger`, defaulting to `info` unless `RUST_LOG` is set
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
