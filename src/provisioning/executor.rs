use alloy::dyn_abi::DynSolValue;
use futures::future::try_join_all;
use std::collections::HashMap;
use tracing::{debug, error, info};

use super::{BuildPlan, BuildStep, ComponentSlot};
use crate::errors::ProvisionError;
use crate::factory::{ComponentFactory, ComponentHandle};
use crate::models::Accounts;

/// Handles produced by a plan run, keyed by slot
#[derive(Debug, Clone, Default)]
pub struct BuiltComponents {
    handles: HashMap<ComponentSlot, ComponentHandle>,
}

impl BuiltComponents {
    pub fn get(&self, slot: ComponentSlot) -> Option<&ComponentHandle> {
        self.handles.get(&slot)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn take(&mut self, slot: ComponentSlot) -> Result<ComponentHandle, ProvisionError> {
        self.handles
            .remove(&slot)
            .ok_or_else(|| ProvisionError::InvalidPlan(format!("plan did not build {}", slot)))
    }
}

/// Run `plan` against `factory`.
///
/// Stages run in order and the steps of a stage run concurrently. The first
/// failing step fails the whole run and no handles are returned.
pub async fn execute_plan(
    plan: &BuildPlan,
    factory: &dyn ComponentFactory,
    accounts: &Accounts,
) -> Result<BuiltComponents, ProvisionError> {
    plan.validate()?;

    let mut built = BuiltComponents::default();
    let total = plan.stages().len();

    for (index, stage) in plan.stages().iter().enumerate() {
        info!(
            "🏗️  Stage {}/{}: {}",
            index + 1,
            total,
            stage.iter().map(|s| s.slot.to_string()).collect::<Vec<_>>().join(", ")
        );

        let mut pending = Vec::with_capacity(stage.len());
        for step in stage {
            let args = step.resolve_args(accounts, &built.handles)?;
            pending.push(build_step(factory, step, args));
        }

        for (slot, handle) in try_join_all(pending).await? {
            built.handles.insert(slot, handle);
        }
    }

    Ok(built)
}

async fn build_step(
    factory: &dyn ComponentFactory,
    step: &BuildStep,
    args: Vec<DynSolValue>,
) -> Result<(ComponentSlot, ComponentHandle), ProvisionError> {
    debug!("Building {} from {} on {:?}", step.slot, step.template, step.layer);

    match factory.create(step.template, step.layer, args).await {
        Ok(handle) => {
            debug!("  {} -> {}", step.slot, handle.address);
            Ok((step.slot, handle))
        }
        Err(source) => {
            error!("❌ Failed to build {}: {}", step.slot, source);
            Err(ProvisionError::ComponentConstructionFailure {
                slot: step.slot,
                source,
            })
        }
    }
}
