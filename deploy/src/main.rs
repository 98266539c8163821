use price_trap_deploy::chain::RpcChain;
use price_trap_deploy::deployer::{self, DeployError};
use price_trap_deploy::shared::{config, init_tracing};

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        if let DeployError::Step(failure) = &err {
            tracing::error!(
                deployed = %failure.record.to_json(),
                "Contracts deployed before the failure remain on chain"
            );
        }
        tracing::error!(error = %err, "Deployment failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), DeployError> {
    let config = config().map_err(price_trap_deploy::error::Error::from)?;
    let chain = RpcChain::connect(&config).await?;
    deployer::deploy(&chain, &config).await?;
    Ok(())
}
