use lambda_ddns::{
    config::TargetConfig, init_logging, lambda::InvocationHandler, updater::Updater,
};
use lambda_runtime::{Error, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();

    let config = TargetConfig::from_env().inspect_err(|err| log::error!("{err}"))?;
    log::info!(
        "Managing {} security groups for {} in {}",
        config.security_group_ids().len(),
        config.hostname(),
        config.region()
    );

    let handler = InvocationHandler::new(Updater::connect(config).await?);
    let handler = &handler;

    lambda_runtime::run(service_fn(move |event| handler.handle(event))).await
}
