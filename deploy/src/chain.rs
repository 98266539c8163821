use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use crate::drosera::ETH_CHAIN_ID;
use crate::error::{ConfigError, Error, Result};
use crate::shared::Config;

/// The remote operations the deployment scripts need.
///
/// Every transaction method waits for the receipt before returning.
#[async_trait]
pub trait Chain: Send + Sync {
    /// Address of the signing identity paying for transactions.
    fn signer(&self) -> Address;

    async fn balance(&self, address: Address) -> Result<U256>;

    /// Sends a contract creation transaction, returns the new contract's address.
    async fn deploy(&self, init_code: Bytes) -> Result<Address>;

    /// Sends a transaction calling `to` with `input`.
    async fn send(&self, to: Address, input: Bytes) -> Result<TxHash>;
}

pub struct RpcChain {
    provider: DynProvider,
    signer: Address,
}

pub fn parse_signer(private_key: &str) -> Result<PrivateKeySigner> {
    private_key
        .trim()
        .trim_start_matches("0x")
        .parse::<PrivateKeySigner>()
        .map_err(|e| {
            ConfigError::Invalid {
                name: "PRIVATE_KEY",
                reason: e.to_string(),
            }
            .into()
        })
}

/// Fails unless the transaction executed successfully.
fn ensure_success(receipt: TransactionReceipt) -> Result<TransactionReceipt> {
    if !receipt.status() {
        return Err(Error::Reverted(receipt.transaction_hash));
    }
    Ok(receipt)
}

fn created_address(receipt: &TransactionReceipt) -> Result<Address> {
    receipt
        .contract_address
        .ok_or(Error::MissingContractAddress(receipt.transaction_hash))
}

impl RpcChain {
    pub fn new(provider: DynProvider, signer: Address) -> Self {
        RpcChain { provider, signer }
    }

    pub async fn connect(config: &Config) -> Result<Self> {
        let signer = parse_signer(&config.private_key)?;
        let address = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect(&config.rpc_url)
            .await?
            .erased();
        let chain_id = provider.get_chain_id().await?;
        if chain_id != ETH_CHAIN_ID {
            tracing::warn!(
                chain_id,
                expected = ETH_CHAIN_ID,
                "Endpoint chain id differs from the one written to the drosera config"
            );
        }
        tracing::info!(chain_id, signer = %address, "Connected");
        Ok(RpcChain::new(provider, address))
    }

    async fn submit(&self, tx: TransactionRequest) -> Result<TransactionReceipt> {
        let pending = self.provider.send_transaction(tx).await?;
        tracing::debug!(tx = %pending.tx_hash(), "Transaction sent, waiting for receipt");
        ensure_success(pending.get_receipt().await?)
    }
}

#[async_trait]
impl Chain for RpcChain {
    fn signer(&self) -> Address {
        self.signer
    }

    async fn balance(&self, address: Address) -> Result<U256> {
        Ok(self.provider.get_balance(address).await?)
    }

    async fn deploy(&self, init_code: Bytes) -> Result<Address> {
        let tx = TransactionRequest::default().with_deploy_code(init_code);
        let receipt = self.submit(tx).await?;
        created_address(&receipt)
    }

    async fn send(&self, to: Address, input: Bytes) -> Result<TxHash> {
        let tx = TransactionRequest::default().with_to(to).with_input(input);
        let receipt = self.submit(tx).await?;
        Ok(receipt.transaction_hash)
    }
}
