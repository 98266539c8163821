use price_trap_deploy::chain::RpcChain;
use price_trap_deploy::error::Result;
use price_trap_deploy::probe::{probe, FAUCET_URL};
use price_trap_deploy::shared::{config, init_tracing};

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        tracing::error!(error = %err, "Connection check failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = config()?;
    let chain = RpcChain::connect(&config).await?;
    let report = probe(&chain).await?;
    tracing::info!(wallet = %report.address, balance = %report.balance_ether(), "Connection successful");
    if report.needs_funding() {
        tracing::warn!(faucet = FAUCET_URL, "Need more ETH from faucet");
    }
    Ok(())
}
