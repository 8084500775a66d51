use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, Bytes};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ComponentTemplate;
use crate::errors::FactoryError;

/// Which side of the bridge a component lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Chain 1, where the canonical L1 contracts and the L1 bridge live
    L1,
    /// Chain 2, where the L2 bridge and its AMM live
    L2,
}

/// A deployed component together with the inputs it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentHandle {
    pub address: Address,
    pub template: ComponentTemplate,
    pub layer: Layer,
    pub constructor_args: Vec<DynSolValue>,
}

impl ComponentHandle {
    /// Constructor argument at `index` when it was an address.
    pub fn address_arg(&self, index: usize) -> Option<Address> {
        self.constructor_args.get(index).and_then(DynSolValue::as_address)
    }
}

/// Deploys contract templates and lets callers talk to what was deployed.
///
/// Each `create` call is atomic from the caller's point of view: it either
/// returns a handle for a live component or an error, never a half-built one.
#[async_trait]
pub trait ComponentFactory: Send + Sync {
    /// Accounts available for fixture roles, in a stable order
    async fn accounts(&self) -> Result<Vec<Address>, FactoryError>;

    /// Deploy `template` on `layer` with the given constructor arguments
    async fn create(
        &self,
        template: ComponentTemplate,
        layer: Layer,
        args: Vec<DynSolValue>,
    ) -> Result<ComponentHandle, FactoryError>;

    /// Read-only call against a deployed component
    async fn call(&self, handle: &ComponentHandle, call_data: Bytes) -> Result<Bytes, FactoryError>;

    /// Get a human-readable description of this factory
    fn description(&self) -> &str;
}
