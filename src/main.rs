use std::{io, process::ExitCode, time::Duration};

use clap::Parser;
use lambda_ddns::{
    cli::{Args, ConfigLoader},
    error::DdnsError,
    init_logging,
    updater::Updater,
};

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let args = Args::parse();

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", diagnostic(&err));
            ExitCode::from(err.exit_status())
        }
    }
}

async fn run(args: &Args) -> Result<(), DdnsError> {
    let config = ConfigLoader::load(args)?;
    let updater = Updater::connect(config).await?;

    tokio::select! {
        result = updater.update_within(Duration::from_secs(args.timeout)) => result.map(|_| ()),
        signal = tokio::signal::ctrl_c() => Err(interruption(signal)),
    }
}

fn diagnostic(err: &DdnsError) -> String {
    if err.is_config_error() {
        format!("Configuration error: {err}")
    } else {
        format!("Error: {err}")
    }
}

/// A delivered Ctrl-C interrupts the run; a failed registration is reported as such
fn interruption(signal: io::Result<()>) -> DdnsError {
    match signal {
        Ok(()) => DdnsError::Interrupted,
        Err(err) => DdnsError::Signal(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_labelled() {
        let err = DdnsError::MissingConfig {
            name: "target hostname",
        };
        assert_eq!(
            diagnostic(&err),
            "Configuration error: no target hostname specified"
        );
        assert_eq!(err.exit_status(), 2);
    }

    #[test]
    fn run_errors_are_plain() {
        let err = DdnsError::NoAddresses {
            hostname: "home.example.com".to_string(),
        };
        assert_eq!(
            diagnostic(&err),
            "Error: hostname home.example.com did not resolve to any IPv4 address"
        );
        assert_eq!(err.exit_status(), 1);
    }

    #[test]
    fn delivered_signal_interrupts() {
        assert!(matches!(interruption(Ok(())), DdnsError::Interrupted));
    }

    #[test]
    fn failed_signal_registration_is_not_an_interruption() {
        let err = interruption(Err(io::Error::other("signal driver unavailable")));
        match err {
            DdnsError::Signal(source) => assert_eq!(source.to_string(), "signal driver unavailable"),
            other => panic!("expected Signal, got {other:?}"),
        }
        assert_eq!(interruption(Err(io::Error::other("x"))).exit_status(), 1);
    }
}
