use alloy::primitives::Address;
use crate::contracts::ContractType;
use crate::error::Result;
use crate::record::DeploymentRecord;

pub const DROSERA_RPC: &str = "https://relay.hoodi.drosera.io";
pub const ETH_CHAIN_ID: u64 = 560048;
pub const DROSERA_ADDRESS: &str = "0x91cB447BaFc6e0EA0F4Fe056F5a9b1F14bb06e5D";
pub const RESPONSE_FUNCTION: &str = "handlePriceDeviation(string)";

/// Operator-facing parameters of the price deviation trap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrapSettings {
    pub cooldown_period_blocks: u64,
    pub min_number_of_operators: u64,
    pub max_number_of_operators: u64,
    pub block_sample_size: u64,
    pub private_trap: bool,
}

impl Default for TrapSettings {
    fn default() -> Self {
        TrapSettings {
            cooldown_period_blocks: 33,
            min_number_of_operators: 1,
            max_number_of_operators: 2,
            block_sample_size: 100,
            private_trap: true,
        }
    }
}

/// Entries of the record the document embeds.
pub const REQUIRED_ENTRIES: [ContractType; 1] = [ContractType::ResponseContract];

/// Renders `drosera.toml`. Values are substituted verbatim.
pub fn render(
    ethereum_rpc: &str,
    record: &DeploymentRecord,
    whitelist: &[Address],
    settings: &TrapSettings,
) -> Result<String> {
    let response_contract = record.require(ContractType::ResponseContract)?;
    let whitelist = whitelist
        .iter()
        .map(|address| format!("\"{}\"", address.to_checksum(None)))
        .collect::<Vec<_>>()
        .join(", ");
    let trap_path = format!(
        "out/{0}.sol/{0}.json",
        ContractType::PriceDeviationTrap.name()
    );
    Ok(format!(
        r#"ethereum_rpc = "{ethereum_rpc}"
drosera_rpc = "{DROSERA_RPC}"
eth_chain_id = {ETH_CHAIN_ID}
drosera_address = "{DROSERA_ADDRESS}"

[traps.price_deviation_trap]
name = "Price Deviation Trap"
description = "Monitors price for significant deviations from baseline."
path = "{trap_path}"
response_contract = "{response_contract}"
response_function = "{RESPONSE_FUNCTION}"
# address = "YOUR_TRAP_ADDRESS_AFTER_DROSERA_APPLY"
cooldown_period_blocks = {cooldown}
min_number_of_operators = {min_operators}
max_number_of_operators = {max_operators}
block_sample_size = {sample_size}
private_trap = {private_trap}
whitelist = [{whitelist}]
"#,
        cooldown = settings.cooldown_period_blocks,
        min_operators = settings.min_number_of_operators,
        max_operators = settings.max_number_of_operators,
        sample_size = settings.block_sample_size,
        private_trap = settings.private_trap,
    ))
}
