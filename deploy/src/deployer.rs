use std::collections::HashMap;
use std::path::Path;
use alloy::primitives::utils::format_ether;
use alloy::primitives::Address;
use crate::artifact::{Artifact, Value};
use crate::chain::Chain;
use crate::contracts::{full_plan, Arg, ContractType, Step};
use crate::drosera;
use crate::error::{Error, Result};
use crate::output;
use crate::record::DeploymentRecord;
use crate::shared::Config;

/// A plan step failed; nothing after it was attempted.
#[derive(Debug, thiserror::Error)]
#[error("step {} ({step}) failed after {completed} completed steps: {source}", .index + 1)]
pub struct StepFailure {
    /// Zero-based position of the failing step in the plan.
    pub index: usize,
    pub step: String,
    /// Steps of this run that succeeded. Entries carried in from an existing
    /// record are not counted.
    pub completed: usize,
    /// Addresses deployed before the failure. These contracts stay on chain.
    pub record: DeploymentRecord,
    pub source: Error,
}

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error(transparent)]
    Step(#[from] StepFailure),
    #[error(transparent)]
    Other(#[from] Error),
}

/// Executes plan steps in order against a chain, accumulating deployed
/// addresses into a record.
pub struct Sequencer<'a, C: Chain + ?Sized> {
    chain: &'a C,
    artifacts_dir: &'a Path,
    artifacts: HashMap<ContractType, Artifact>,
    record: DeploymentRecord,
}

impl<'a, C: Chain + ?Sized> Sequencer<'a, C> {
    pub fn new(chain: &'a C, artifacts_dir: &'a Path) -> Self {
        Sequencer {
            chain,
            artifacts_dir,
            artifacts: HashMap::new(),
            record: DeploymentRecord::new(),
        }
    }

    /// Starts from an existing record; deploying a contract already in it
    /// replaces that entry in place.
    pub fn with_record(mut self, record: DeploymentRecord) -> Self {
        self.record = record;
        self
    }

    pub async fn run(mut self, plan: &[Step]) -> std::result::Result<DeploymentRecord, StepFailure> {
        let mut completed = 0;
        for (index, step) in plan.iter().enumerate() {
            tracing::debug!(step = index + 1, total = plan.len(), "Executing {}", step);
            if let Err(source) = self.execute(step).await {
                return Err(StepFailure {
                    index,
                    step: step.to_string(),
                    completed,
                    record: self.record,
                    source,
                });
            }
            completed += 1;
        }
        Ok(self.record)
    }

    async fn execute(&mut self, step: &Step) -> Result<()> {
        match step {
            Step::Deploy { contract, args } => {
                tracing::info!(contract = %contract, "Deploying");
                let values = self.resolve(args)?;
                let init_code = self.artifact(*contract)?.deploy_code(&values)?;
                let address = self.chain.deploy(init_code).await?;
                if let Some(previous) = self.record.insert(*contract, address) {
                    tracing::info!(contract = %contract, %previous, "Replacing recorded address");
                }
                tracing::info!(contract = %contract, %address, "Deployed");
            }
            Step::Call { contract, function, args } => {
                tracing::info!(contract = %contract, function, "Configuring");
                let target = self.record.address(*contract)?;
                let values = self.resolve(args)?;
                let input = self.artifact(*contract)?.encode_call(function, &values)?;
                let tx = self.chain.send(target, input).await?;
                tracing::info!(contract = %contract, function, %tx, "Configured");
            }
        }
        Ok(())
    }

    fn resolve(&self, args: &[Arg]) -> Result<Vec<Value>> {
        args.iter()
            .map(|arg| match arg {
                Arg::Literal(literal) => Ok(Value::Literal(literal.to_string())),
                Arg::AddressOf(contract) => self.record.address(*contract).map(Value::Address),
            })
            .collect()
    }

    fn artifact(&mut self, contract: ContractType) -> Result<&Artifact> {
        if !self.artifacts.contains_key(&contract) {
            let artifact = Artifact::load(self.artifacts_dir, contract)?;
            self.artifacts.insert(contract, artifact);
        }
        Ok(&self.artifacts[&contract])
    }
}

/// Deploys and wires the whole contract suite, then writes the record and
/// the drosera config.
pub async fn deploy<C: Chain + ?Sized>(
    chain: &C,
    config: &Config,
) -> std::result::Result<DeploymentRecord, DeployError> {
    let signer = chain.signer();
    let balance = chain.balance(signer).await?;
    tracing::info!(deployer = %signer, balance = %format_ether(balance), "Starting deployment");

    let record = Sequencer::new(chain, &config.artifacts_dir)
        .run(&full_plan())
        .await?;

    write_outputs(config, &record, signer)?;
    for contract in ContractType::ALL {
        if let Some(address) = record.get(contract) {
            tracing::info!(contract = %contract, address, "Deployment complete");
        }
    }
    Ok(record)
}

/// Replaces one contract of an existing deployment with a fresh instance
/// deployed without constructor arguments. Every other recorded address is
/// kept as is.
pub async fn redeploy<C: Chain + ?Sized>(
    chain: &C,
    config: &Config,
    contract: ContractType,
) -> std::result::Result<DeploymentRecord, DeployError> {
    let record = DeploymentRecord::load(&config.outputs.record)?;
    tracing::info!(path = %config.outputs.record.display(), entries = record.len(), "Loaded existing addresses");
    // the document is regenerated afterwards, fail before spending anything
    for required in drosera::REQUIRED_ENTRIES {
        if required != contract {
            record.require(required)?;
        }
    }

    let signer = chain.signer();
    tracing::info!(deployer = %signer, contract = %contract, "Redeploying");
    let record = Sequencer::new(chain, &config.artifacts_dir)
        .with_record(record)
        .run(&[Step::deploy(contract, vec![])])
        .await?;

    write_outputs(config, &record, signer)?;
    tracing::info!(record = %record.to_json(), "Redeployment complete");
    Ok(record)
}

fn write_outputs(config: &Config, record: &DeploymentRecord, signer: Address) -> Result<()> {
    let document = drosera::render(&config.rpc_url, record, &[signer], &config.trap)?;
    output::commit(&config.outputs, record, &document)?;
    tracing::info!(
        record = %config.outputs.record.display(),
        drosera_config = %config.outputs.drosera_config.display(),
        "Files written"
    );
    Ok(())
}
