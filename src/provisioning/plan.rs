use alloy::dyn_abi::DynSolValue;
use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::wrapper::messenger_wrapper_args;
use crate::chains::{self, ChainVariant};
use crate::errors::ProvisionError;
use crate::factory::{ComponentHandle, ComponentTemplate, Layer};
use crate::models::{AccountRole, Accounts};

/// Named output of one build step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentSlot {
    L1CanonicalToken,
    L2CanonicalToken,
    Weth,
    Accounting,
    Bridge,
    L1Messenger,
    L2Messenger,
    L2UniswapFactory,
    L1Bridge,
    L1CanonicalBridge,
    L2UniswapRouter,
    L2Bridge,
    MessengerWrapper,
}

impl fmt::Display for ComponentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentSlot::L1CanonicalToken => "l1_canonical_token",
            ComponentSlot::L2CanonicalToken => "l2_canonical_token",
            ComponentSlot::Weth => "weth",
            ComponentSlot::Accounting => "accounting",
            ComponentSlot::Bridge => "bridge",
            ComponentSlot::L1Messenger => "l1_messenger",
            ComponentSlot::L2Messenger => "l2_messenger",
            ComponentSlot::L2UniswapFactory => "l2_uniswap_factory",
            ComponentSlot::L1Bridge => "l1_bridge",
            ComponentSlot::L1CanonicalBridge => "l1_canonical_bridge",
            ComponentSlot::L2UniswapRouter => "l2_uniswap_router",
            ComponentSlot::L2Bridge => "l2_bridge",
            ComponentSlot::MessengerWrapper => "messenger_wrapper",
        };
        f.write_str(name)
    }
}

/// Where a constructor argument comes from
#[derive(Debug, Clone, PartialEq)]
pub enum PlanArg {
    /// Address of a component built in an earlier stage
    AddressOf(ComponentSlot),
    Account(AccountRole),
    /// Encoded as `uint256[]`
    ChainIds(Vec<u64>),
    Value(DynSolValue),
}

impl PlanArg {
    pub fn string(value: &str) -> Self {
        PlanArg::Value(DynSolValue::String(value.to_string()))
    }

    pub fn uint(value: u64) -> Self {
        PlanArg::Value(DynSolValue::Uint(U256::from(value), 256))
    }

    fn resolve(
        &self,
        accounts: &Accounts,
        built: &HashMap<ComponentSlot, ComponentHandle>,
    ) -> Result<DynSolValue, ProvisionError> {
        match self {
            PlanArg::AddressOf(slot) => built
                .get(slot)
                .map(|handle| DynSolValue::Address(handle.address))
                .ok_or_else(|| ProvisionError::InvalidPlan(format!("{} used before it was built", slot))),
            PlanArg::Account(role) => Ok(DynSolValue::Address(accounts.get(*role))),
            PlanArg::ChainIds(ids) => Ok(DynSolValue::Array(
                ids.iter()
                    .map(|id| DynSolValue::Uint(U256::from(*id), 256))
                    .collect(),
            )),
            PlanArg::Value(value) => Ok(value.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildStep {
    pub slot: ComponentSlot,
    pub template: ComponentTemplate,
    pub layer: Layer,
    pub args: Vec<PlanArg>,
}

impl BuildStep {
    pub fn new(slot: ComponentSlot, template: ComponentTemplate, layer: Layer, args: Vec<PlanArg>) -> Self {
        Self { slot, template, layer, args }
    }

    pub fn dependencies(&self) -> impl Iterator<Item = ComponentSlot> + '_ {
        self.args.iter().filter_map(|arg| match arg {
            PlanArg::AddressOf(slot) => Some(*slot),
            _ => None,
        })
    }

    pub fn resolve_args(
        &self,
        accounts: &Accounts,
        built: &HashMap<ComponentSlot, ComponentHandle>,
    ) -> Result<Vec<DynSolValue>, ProvisionError> {
        self.args.iter().map(|arg| arg.resolve(accounts, built)).collect()
    }
}

/// Ordered stages of build steps.
///
/// Steps inside a stage only depend on earlier stages and may be built
/// concurrently; stages are built strictly in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildPlan {
    stages: Vec<Vec<BuildStep>>,
}

impl BuildPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(mut self, steps: Vec<BuildStep>) -> Self {
        self.stages.push(steps);
        self
    }

    pub fn stages(&self) -> &[Vec<BuildStep>] {
        &self.stages
    }

    pub fn steps(&self) -> impl Iterator<Item = &BuildStep> {
        self.stages.iter().flatten()
    }

    pub fn step(&self, slot: ComponentSlot) -> Option<&BuildStep> {
        self.steps().find(|step| step.slot == slot)
    }

    pub fn stage_of(&self, slot: ComponentSlot) -> Option<usize> {
        self.stages
            .iter()
            .position(|stage| stage.iter().any(|step| step.slot == slot))
    }

    /// Every slot is built once, and only after everything it depends on.
    pub fn validate(&self) -> Result<(), ProvisionError> {
        let mut available: HashSet<ComponentSlot> = HashSet::new();

        for (index, stage) in self.stages.iter().enumerate() {
            for step in stage {
                if let Some(missing) = step.dependencies().find(|dep| !available.contains(dep)) {
                    return Err(ProvisionError::InvalidPlan(format!(
                        "stage {}: {} depends on {} which is not built by an earlier stage",
                        index + 1,
                        step.slot,
                        missing
                    )));
                }
            }

            for step in stage {
                if !available.insert(step.slot) {
                    return Err(ProvisionError::InvalidPlan(format!(
                        "stage {}: {} is built more than once",
                        index + 1,
                        step.slot
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Origin chains the L2 bridge accepts transfers from
pub fn l2_bridge_supported_chain_ids() -> Vec<u64> {
    vec![chains::MAINNET]
}

/// Full fixture topology for one chain variant
pub fn fixture_plan(variant: &ChainVariant) -> BuildPlan {
    use ComponentSlot::*;
    use ComponentTemplate as T;

    BuildPlan::new()
        .stage(vec![
            BuildStep::new(
                L1CanonicalToken,
                T::MockErc20,
                Layer::L1,
                vec![PlanArg::string("Dai Stable Token"), PlanArg::string("DAI")],
            ),
            BuildStep::new(
                L2CanonicalToken,
                T::MockErc20,
                Layer::L2,
                vec![PlanArg::string("L2 Dai Stable Token"), PlanArg::string("L2DAI")],
            ),
            BuildStep::new(
                Weth,
                T::MockErc20,
                Layer::L2,
                vec![PlanArg::string("WETH"), PlanArg::string("WETH")],
            ),
            BuildStep::new(Accounting, T::MockAccounting, Layer::L1, vec![PlanArg::Account(AccountRole::Bonder)]),
            BuildStep::new(Bridge, T::MockBridge, Layer::L1, vec![PlanArg::Account(AccountRole::Bonder)]),
        ])
        .stage(vec![
            BuildStep::new(L1Messenger, T::MockL1Messenger, Layer::L1, vec![PlanArg::AddressOf(L1CanonicalToken)]),
            BuildStep::new(L2Messenger, T::MockL2Messenger, Layer::L2, vec![PlanArg::AddressOf(L2CanonicalToken)]),
            BuildStep::new(
                L2UniswapFactory,
                T::UniswapV2Factory,
                Layer::L2,
                vec![PlanArg::Account(AccountRole::User)],
            ),
            BuildStep::new(
                L1Bridge,
                T::MockL1Bridge,
                Layer::L1,
                vec![PlanArg::AddressOf(L1CanonicalToken), PlanArg::Account(AccountRole::Bonder)],
            ),
        ])
        .stage(vec![
            BuildStep::new(
                L1CanonicalBridge,
                T::MockL1CanonicalBridge,
                Layer::L1,
                vec![PlanArg::AddressOf(L1CanonicalToken), PlanArg::AddressOf(L1Messenger)],
            ),
            BuildStep::new(
                L2UniswapRouter,
                T::UniswapV2Router02,
                Layer::L2,
                vec![PlanArg::AddressOf(L2UniswapFactory), PlanArg::AddressOf(Weth)],
            ),
        ])
        .stage(vec![BuildStep::new(
            L2Bridge,
            variant.l2_bridge,
            Layer::L2,
            vec![
                PlanArg::AddressOf(L2Messenger),
                PlanArg::Account(AccountRole::Governance),
                PlanArg::AddressOf(L2CanonicalToken),
                PlanArg::AddressOf(L1Bridge),
                PlanArg::ChainIds(l2_bridge_supported_chain_ids()),
                PlanArg::Account(AccountRole::Bonder),
                PlanArg::AddressOf(L2UniswapRouter),
            ],
        )])
        .stage(vec![BuildStep::new(
            MessengerWrapper,
            variant.messenger_wrapper,
            Layer::L1,
            messenger_wrapper_args(variant.family, L1Bridge, L2Bridge, L1Messenger),
        )])
}
