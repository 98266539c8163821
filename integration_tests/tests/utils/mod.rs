use std::path::{Path, PathBuf};
use std::sync::Mutex;
use alloy::primitives::{hex, Address, Bytes, TxHash, U256};
use alloy::transports::TransportErrorKind;
use async_trait::async_trait;
use maplit::hashmap;
use serde_json::{json, Value};
use tempfile::TempDir;
use price_trap_deploy::artifact::artifact_path;
use price_trap_deploy::chain::Chain;
use price_trap_deploy::contracts::ContractType;
use price_trap_deploy::error::{Error, Result};
use price_trap_deploy::shared::{config_from, Config};

pub const RPC_URL: &str = "https://rpc.hoodi.example";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tx {
    Deploy { init_code: Bytes, address: Address },
    Send { to: Address, input: Bytes },
}

/// In-memory chain: every transaction succeeds except the `fail_at`-th one.
pub struct FakeChain {
    signer: Address,
    balance: U256,
    fail_at: Option<usize>,
    attempts: Mutex<usize>,
    txs: Mutex<Vec<Tx>>,
}

impl FakeChain {
    pub fn new() -> Self {
        FakeChain {
            signer: Address::from(rand::random::<[u8; 20]>()),
            balance: U256::from(10u64).pow(U256::from(18)),
            fail_at: None,
            attempts: Mutex::new(0),
            txs: Mutex::new(Vec::new()),
        }
    }

    /// Fails the n-th transaction (1-based).
    pub fn failing_at(n: usize) -> Self {
        FakeChain {
            fail_at: Some(n),
            ..Self::new()
        }
    }

    pub fn with_balance(balance: U256) -> Self {
        FakeChain {
            balance,
            ..Self::new()
        }
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }

    pub fn txs(&self) -> Vec<Tx> {
        self.txs.lock().unwrap().clone()
    }

    fn attempt(&self) -> Result<()> {
        let mut attempts = self.attempts.lock().unwrap();
        *attempts += 1;
        if self.fail_at == Some(*attempts) {
            return Err(Error::Rpc(TransportErrorKind::custom_str("insufficient funds for gas")));
        }
        Ok(())
    }
}

#[async_trait]
impl Chain for FakeChain {
    fn signer(&self) -> Address {
        self.signer
    }

    async fn balance(&self, address: Address) -> Result<U256> {
        assert_eq!(address, self.signer);
        Ok(self.balance)
    }

    async fn deploy(&self, init_code: Bytes) -> Result<Address> {
        self.attempt()?;
        let address = Address::from(rand::random::<[u8; 20]>());
        self.txs.lock().unwrap().push(Tx::Deploy { init_code, address });
        Ok(address)
    }

    async fn send(&self, to: Address, input: Bytes) -> Result<TxHash> {
        self.attempt()?;
        self.txs.lock().unwrap().push(Tx::Send { to, input });
        Ok(TxHash::from(rand::random::<[u8; 32]>()))
    }
}

/// Bytecode of each fixture contract: a distinct three byte prefix.
pub fn bytecode(contract: ContractType) -> Vec<u8> {
    let index = ContractType::ALL.iter().position(|c| *c == contract).unwrap() as u8;
    vec![0x60, 0x80, index]
}

fn constructor(inputs: Value) -> Value {
    json!({ "type": "constructor", "stateMutability": "nonpayable", "inputs": inputs })
}

fn function(name: &str, inputs: Value) -> Value {
    json!({
        "type": "function",
        "name": name,
        "stateMutability": "nonpayable",
        "inputs": inputs,
        "outputs": []
    })
}

fn param(name: &str, ty: &str) -> Value {
    json!({ "name": name, "type": ty, "internalType": ty })
}

fn abi(contract: ContractType, trap_takes_registry: bool) -> Value {
    match contract {
        ContractType::TrapRegistry => json!([
            function("setPriceConfig", json!([param("priceConfig", "address")])),
            function("setPriceMock", json!([param("priceMock", "address")])),
        ]),
        ContractType::PriceConfig => json!([constructor(json!([
            param("deviationThreshold", "uint256"),
            param("baselinePrice", "uint256"),
        ]))]),
        ContractType::PriceMock => json!([constructor(json!([param("initialPrice", "uint256")]))]),
        ContractType::PriceDeviationTrap if trap_takes_registry => {
            json!([constructor(json!([param("registry", "address")]))])
        }
        ContractType::PriceDeviationTrap => json!([
            function("collect", json!([])),
        ]),
        ContractType::ResponseContract => json!([
            function("handlePriceDeviation", json!([param("message", "string")])),
        ]),
    }
}

pub fn write_artifact(artifacts_dir: &Path, contract: ContractType, abi: Value) {
    let path = artifact_path(artifacts_dir, contract);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let artifact = json!({
        "abi": abi,
        "bytecode": {
            "object": hex::encode_prefixed(bytecode(contract)),
            "sourceMap": "",
            "linkReferences": {}
        },
        "methodIdentifiers": {}
    });
    std::fs::write(path, serde_json::to_string_pretty(&artifact).unwrap()).unwrap();
}

/// Temporary project directory with forge artifacts and a config pointing at it.
pub struct Workspace {
    pub dir: TempDir,
    pub config: Config,
}

impl Workspace {
    /// `trap_takes_registry` selects between the registry-taking trap constructor and
    /// the constructor-less trap used by redeployments.
    pub fn new(trap_takes_registry: bool) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for contract in ContractType::ALL {
            write_artifact(&root.join("out"), contract, abi(contract, trap_takes_registry));
        }
        let vars = hashmap! {
            "RPC_URL" => RPC_URL.to_string(),
            "PRIVATE_KEY" => "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80".to_string(),
            "ARTIFACTS_DIR" => root.join("out").display().to_string(),
            "RECORD_PATH" => root.join("deployed-addresses.json").display().to_string(),
            "DROSERA_CONFIG_PATH" => root.join("drosera.toml").display().to_string(),
        };
        let config = config_from(|name| vars.get(name).cloned()).unwrap();
        Workspace { dir, config }
    }

    pub fn record_path(&self) -> PathBuf {
        self.config.outputs.record.clone()
    }

    pub fn drosera_config(&self) -> toml::Value {
        let content = std::fs::read_to_string(&self.config.outputs.drosera_config).unwrap();
        toml::from_str(&content).unwrap()
    }

    pub fn remove_artifact(&self, contract: ContractType) {
        std::fs::remove_file(artifact_path(&self.config.artifacts_dir, contract)).unwrap();
    }
}

pub fn selector(signature: &str) -> [u8; 4] {
    let hash = alloy::primitives::keccak256(signature);
    [hash[0], hash[1], hash[2], hash[3]]
}
