use std::path::PathBuf;
use alloy::primitives::TxHash;
use alloy::providers::PendingTransactionError;
use alloy::transports::TransportError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {reason}")]
    Invalid {
        name: &'static str,
        reason: String,
    },
    #[error("Failed to load .env: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid artifact {path}: {source}")]
    ArtifactParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Artifact {0} has no bytecode")]
    EmptyBytecode(PathBuf),

    #[error("{contract} expects {expected} constructor arguments, got {actual}")]
    ConstructorArity {
        contract: String,
        expected: usize,
        actual: usize,
    },

    #[error("{contract} has no function {function} taking {arity} arguments")]
    UnknownFunction {
        contract: String,
        function: String,
        arity: usize,
    },

    #[error("ABI encoding failed: {0}")]
    Abi(#[from] alloy::dyn_abi::Error),

    #[error("RPC error: {0}")]
    Rpc(#[from] TransportError),

    #[error("Transaction confirmation failed: {0}")]
    PendingTransaction(#[from] PendingTransactionError),

    #[error("Transaction {0} reverted")]
    Reverted(TxHash),

    #[error("No contract address in receipt of {0}")]
    MissingContractAddress(TxHash),

    #[error("Record has no entry {0}")]
    MissingRecordEntry(String),

    #[error("Record entry {key} is not an address: {value}")]
    InvalidRecordEntry {
        key: String,
        value: String,
    },

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid deployment record {path}: {source}")]
    RecordParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
