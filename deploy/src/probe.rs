use alloy::primitives::utils::format_ether;
use alloy::primitives::{Address, U256};
use crate::chain::Chain;
use crate::error::Result;

/// 0.001 ETH
pub const MIN_BALANCE: U256 = U256::from_limbs([1_000_000_000_000_000, 0, 0, 0]);
pub const FAUCET_URL: &str = "https://hoodi-faucet.pk910.de";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub address: Address,
    pub balance: U256,
}

impl ProbeReport {
    pub fn needs_funding(&self) -> bool {
        self.balance < MIN_BALANCE
    }

    pub fn balance_ether(&self) -> String {
        format_ether(self.balance)
    }
}

/// Fetches the signer's balance. Sends no transaction.
pub async fn probe<C: Chain + ?Sized>(chain: &C) -> Result<ProbeReport> {
    let address = chain.signer();
    tracing::info!(wallet = %address, "Testing connection");
    let balance = chain.balance(address).await?;
    Ok(ProbeReport { address, balance })
}
