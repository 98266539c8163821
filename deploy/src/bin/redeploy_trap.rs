use price_trap_deploy::chain::RpcChain;
use price_trap_deploy::contracts::ContractType;
use price_trap_deploy::deployer::{self, DeployError};
use price_trap_deploy::error::Error;
use price_trap_deploy::shared::{config, init_tracing};

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        tracing::error!(error = %err, debug = ?err, "Redeployment failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), DeployError> {
    let config = config().map_err(Error::from)?;
    let chain = RpcChain::connect(&config).await?;
    deployer::redeploy(&chain, &config, ContractType::PriceDeviationTrap).await?;
    Ok(())
}
