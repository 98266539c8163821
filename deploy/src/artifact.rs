use std::path::{Path, PathBuf};
use alloy::dyn_abi::{DynSolValue, JsonAbiExt, Specifier};
use alloy::json_abi::{JsonAbi, Param};
use alloy::primitives::{Address, Bytes};
use serde::Deserialize;
use crate::contracts::ContractType;
use crate::error::{Error, Result};

/// Argument value after plan references have been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Literal(String),
    Address(Address),
}

#[derive(Debug, Deserialize)]
struct ForgeArtifact {
    abi: JsonAbi,
    bytecode: BytecodeObject,
}

#[derive(Debug, Deserialize)]
struct BytecodeObject {
    object: Bytes,
}

/// Compiled contract as produced by `forge build`.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub name: String,
    pub path: PathBuf,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

pub fn artifact_path(artifacts_dir: &Path, contract: ContractType) -> PathBuf {
    artifacts_dir
        .join(format!("{}.sol", contract.name()))
        .join(format!("{}.json", contract.name()))
}

impl Artifact {
    pub fn load(artifacts_dir: &Path, contract: ContractType) -> Result<Self> {
        let path = artifact_path(artifacts_dir, contract);
        let content = std::fs::read_to_string(&path).map_err(|source| Error::ArtifactRead {
            path: path.clone(),
            source,
        })?;
        let parsed: ForgeArtifact =
            serde_json::from_str(&content).map_err(|source| Error::ArtifactParse {
                path: path.clone(),
                source,
            })?;
        if parsed.bytecode.object.is_empty() {
            return Err(Error::EmptyBytecode(path));
        }
        tracing::debug!(
            contract = %contract,
            path = %path.display(),
            bytecode_len = parsed.bytecode.object.len(),
            "Loaded artifact"
        );
        Ok(Artifact {
            name: contract.name().to_string(),
            path,
            abi: parsed.abi,
            bytecode: parsed.bytecode.object,
        })
    }

    /// Creation code: bytecode followed by the ABI-encoded constructor arguments.
    pub fn deploy_code(&self, args: &[Value]) -> Result<Bytes> {
        let encoded_args = match &self.abi.constructor {
            Some(constructor) => {
                let values = self.coerce(&constructor.inputs, args)?;
                constructor.abi_encode_input(&values)?
            }
            None if args.is_empty() => Vec::new(),
            None => {
                return Err(Error::ConstructorArity {
                    contract: self.name.clone(),
                    expected: 0,
                    actual: args.len(),
                })
            }
        };
        let mut code = self.bytecode.to_vec();
        code.extend_from_slice(&encoded_args);
        Ok(Bytes::from(code))
    }

    /// Calldata for `function` (selector included).
    pub fn encode_call(&self, function: &str, args: &[Value]) -> Result<Bytes> {
        let candidate = self
            .abi
            .function(function)
            .and_then(|overloads| overloads.iter().find(|f| f.inputs.len() == args.len()))
            .ok_or_else(|| Error::UnknownFunction {
                contract: self.name.clone(),
                function: function.to_string(),
                arity: args.len(),
            })?;
        let values = self.coerce(&candidate.inputs, args)?;
        Ok(Bytes::from(candidate.abi_encode_input(&values)?))
    }

    fn coerce(&self, params: &[Param], args: &[Value]) -> Result<Vec<DynSolValue>> {
        if params.len() != args.len() {
            return Err(Error::ConstructorArity {
                contract: self.name.clone(),
                expected: params.len(),
                actual: args.len(),
            });
        }
        params
            .iter()
            .zip(args)
            .map(|(param, arg)| -> Result<DynSolValue> {
                match arg {
                    Value::Address(address) => Ok(DynSolValue::Address(*address)),
                    Value::Literal(literal) => Ok(param.resolve()?.coerce_str(literal)?),
                }
            })
            .collect()
    }
}
