use std::path::Path;
use alloy::primitives::Address;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::contracts::ContractType;
use crate::error::{Error, Result};

/// Contract addresses of one deployment, keyed by record key.
///
/// Entries keep their insertion order and their exact form, so a record
/// loaded from disk is written back unchanged apart from the entries
/// explicitly replaced. Contract entries are address strings; any other
/// entry may hold arbitrary JSON and is carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentRecord(IndexMap<String, Value>);

impl DeploymentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| Error::RecordParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Records `address` for `contract`, returning the previous value.
    pub fn insert(&mut self, contract: ContractType, address: Address) -> Option<Value> {
        self.0.insert(
            contract.record_key().to_string(),
            Value::String(address.to_checksum(None)),
        )
    }

    /// Recorded address string of `contract`, if it has one.
    pub fn get(&self, contract: ContractType) -> Option<&str> {
        self.0.get(contract.record_key()).and_then(Value::as_str)
    }

    pub fn require(&self, contract: ContractType) -> Result<&str> {
        let key = contract.record_key();
        match self.0.get(key) {
            Some(Value::String(raw)) => Ok(raw),
            Some(other) => Err(Error::InvalidRecordEntry {
                key: key.to_string(),
                value: other.to_string(),
            }),
            None => Err(Error::MissingRecordEntry(key.to_string())),
        }
    }

    /// Deployed address of `contract`, parsed.
    pub fn address(&self, contract: ContractType) -> Result<Address> {
        let raw = self.require(contract)?;
        raw.parse().map_err(|_| Error::InvalidRecordEntry {
            key: contract.record_key().to_string(),
            value: raw.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_json(&self) -> String {
        // string keys and JSON values always serialize
        serde_json::to_string_pretty(&self.0).unwrap_or_default()
    }
}
