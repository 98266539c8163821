use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractType {
    TrapRegistry,
    PriceConfig,
    PriceMock,
    PriceDeviationTrap,
    ResponseContract,
}

impl ContractType {
    pub const ALL: [ContractType; 5] = [
        ContractType::TrapRegistry,
        ContractType::PriceConfig,
        ContractType::PriceMock,
        ContractType::PriceDeviationTrap,
        ContractType::ResponseContract,
    ];

    /// Name of the solidity contract, which is also the artifact file stem.
    pub fn name(&self) -> &'static str {
        match self {
            ContractType::TrapRegistry => "TrapRegistry",
            ContractType::PriceConfig => "PriceConfig",
            ContractType::PriceMock => "PriceMock",
            ContractType::PriceDeviationTrap => "PriceDeviationTrap",
            ContractType::ResponseContract => "ResponseContract",
        }
    }

    /// Key under which the deployed address is stored in the record file.
    pub fn record_key(&self) -> &'static str {
        match self {
            ContractType::TrapRegistry => "trapRegistry",
            ContractType::PriceConfig => "priceConfig",
            ContractType::PriceMock => "priceMock",
            ContractType::PriceDeviationTrap => "priceDeviationTrap",
            ContractType::ResponseContract => "responseContract",
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// Coerced against the ABI parameter type, e.g. `"10"` for a `uint256`.
    Literal(&'static str),
    /// Address of a contract deployed earlier in the same plan.
    AddressOf(ContractType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Deploy {
        contract: ContractType,
        args: Vec<Arg>,
    },
    Call {
        contract: ContractType,
        function: &'static str,
        args: Vec<Arg>,
    },
}

impl Step {
    pub fn deploy(contract: ContractType, args: Vec<Arg>) -> Self {
        Step::Deploy { contract, args }
    }

    pub fn call(contract: ContractType, function: &'static str, args: Vec<Arg>) -> Self {
        Step::Call { contract, function, args }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Deploy { contract, .. } => write!(f, "deploy {}", contract),
            Step::Call { contract, function, .. } => write!(f, "{}.{}", contract, function),
        }
    }
}

pub fn full_plan() -> Vec<Step> {
    use Arg::*;
    use ContractType::*;
    vec![
        Step::deploy(TrapRegistry, vec![]),
        // 10% deviation threshold, $100 baseline
        Step::deploy(PriceConfig, vec![Literal("10"), Literal("100")]),
        // $100 initial price
        Step::deploy(PriceMock, vec![Literal("100")]),
        Step::call(TrapRegistry, "setPriceConfig", vec![AddressOf(PriceConfig)]),
        Step::call(TrapRegistry, "setPriceMock", vec![AddressOf(PriceMock)]),
        Step::deploy(PriceDeviationTrap, vec![AddressOf(TrapRegistry)]),
        Step::deploy(ResponseContract, vec![]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_plan_deploys_every_contract_once() {
        let deployed: Vec<ContractType> = full_plan()
            .iter()
            .filter_map(|step| match step {
                Step::Deploy { contract, .. } => Some(*contract),
                Step::Call { .. } => None,
            })
            .collect();
        assert_eq!(deployed, ContractType::ALL.to_vec());
    }

    #[test]
    fn test_dependencies_are_deployed_first() {
        let plan = full_plan();
        for (index, step) in plan.iter().enumerate() {
            let args = match step {
                Step::Deploy { args, .. } | Step::Call { args, .. } => args,
            };
            for arg in args {
                if let Arg::AddressOf(dependency) = arg {
                    let deployed_before = plan[..index]
                        .iter()
                        .any(|s| matches!(s, Step::Deploy { contract, .. } if contract == dependency));
                    assert!(deployed_before, "{} needs {} first", step, dependency);
                }
            }
        }
    }

    #[test]
    fn test_step_display() {
        let plan = full_plan();
        assert_eq!(plan[0].to_string(), "deploy TrapRegistry");
        assert_eq!(plan[3].to_string(), "TrapRegistry.setPriceConfig");
    }
}
