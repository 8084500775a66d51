use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{ComponentFactory, ComponentHandle, ComponentTemplate, Layer};
use crate::errors::FactoryError;

const DEFAULT_ACCOUNT_COUNT: u64 = 10;
const ACCOUNT_BASE: u64 = 0x1000;
const COMPONENT_BASE: u64 = 0x5000;

/// Factory that "deploys" into memory.
///
/// Addresses are assigned from a counter so runs are reproducible. Every
/// factory call is counted, which lets callers prove that nothing was
/// attempted on early-failure paths.
#[derive(Debug, Clone)]
pub struct InMemoryFactory {
    accounts: Vec<Address>,
    components: Arc<RwLock<HashMap<Address, ComponentHandle>>>,
    created: Arc<RwLock<Vec<ComponentHandle>>>,
    rejected: HashSet<ComponentTemplate>,
    next_address: Arc<AtomicU64>,
    invocations: Arc<AtomicU64>,
}

impl InMemoryFactory {
    pub fn new() -> Self {
        Self::with_account_count(DEFAULT_ACCOUNT_COUNT)
    }

    pub fn with_account_count(count: u64) -> Self {
        Self {
            accounts: (0..count).map(|i| numbered_address(ACCOUNT_BASE + i)).collect(),
            components: Arc::new(RwLock::new(HashMap::new())),
            created: Arc::new(RwLock::new(Vec::new())),
            rejected: HashSet::new(),
            next_address: Arc::new(AtomicU64::new(COMPONENT_BASE)),
            invocations: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Make every `create` for `template` fail
    pub fn rejecting(mut self, template: ComponentTemplate) -> Self {
        self.rejected.insert(template);
        self
    }

    /// Total number of factory calls made, including failed ones
    pub fn invocations(&self) -> u64 {
        self.invocations.load(Ordering::SeqCst)
    }

    /// Successfully created components in creation order
    pub async fn created(&self) -> Vec<ComponentHandle> {
        self.created.read().await.clone()
    }

    pub async fn get_component(&self, address: Address) -> Option<ComponentHandle> {
        self.components.read().await.get(&address).cloned()
    }
}

impl Default for InMemoryFactory {
    fn default() -> Self {
        Self::new()
    }
}

fn numbered_address(n: u64) -> Address {
    Address::from_word(B256::left_padding_from(&n.to_be_bytes()))
}

#[async_trait]
impl ComponentFactory for InMemoryFactory {
    async fn accounts(&self) -> Result<Vec<Address>, FactoryError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        Ok(self.accounts.clone())
    }

    async fn create(
        &self,
        template: ComponentTemplate,
        layer: Layer,
        args: Vec<DynSolValue>,
    ) -> Result<ComponentHandle, FactoryError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);

        if self.rejected.contains(&template) {
            return Err(FactoryError::Rejected {
                artifact: template.artifact_id().to_string(),
                message: "rejected by in-memory factory".to_string(),
            });
        }

        let address = numbered_address(self.next_address.fetch_add(1, Ordering::SeqCst));
        let handle = ComponentHandle {
            address,
            template,
            layer,
            constructor_args: args,
        };

        self.components.write().await.insert(address, handle.clone());
        self.created.write().await.push(handle.clone());
        Ok(handle)
    }

    async fn call(&self, handle: &ComponentHandle, _call_data: Bytes) -> Result<Bytes, FactoryError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);

        if !self.components.read().await.contains_key(&handle.address) {
            return Err(FactoryError::UnknownComponent(handle.address));
        }
        Ok(Bytes::new())
    }

    fn description(&self) -> &str {
        "InMemoryFactory: deterministic in-process component registry"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_addresses_are_distinct_and_reproducible() {
        let first = InMemoryFactory::new();
        let second = InMemoryFactory::new();

        let a = first.create(ComponentTemplate::MockErc20, Layer::L1, vec![]).await.unwrap();
        let b = first.create(ComponentTemplate::MockErc20, Layer::L2, vec![]).await.unwrap();
        let c = second.create(ComponentTemplate::MockErc20, Layer::L1, vec![]).await.unwrap();

        assert_ne!(a.address, b.address);
        assert_eq!(a.address, c.address);
        assert!(!first.accounts().await.unwrap().contains(&a.address));
    }

    #[tokio::test]
    async fn test_rejected_template_fails_and_is_counted() {
        let factory = InMemoryFactory::new().rejecting(ComponentTemplate::MockBridge);

        let result = factory.create(ComponentTemplate::MockBridge, Layer::L1, vec![]).await;

        assert!(matches!(result, Err(FactoryError::Rejected { .. })));
        assert_eq!(factory.invocations(), 1);
        assert!(factory.created().await.is_empty());
    }

    #[tokio::test]
    async fn test_call_requires_known_component() {
        let factory = InMemoryFactory::new();
        let handle = factory.create(ComponentTemplate::MockAccounting, Layer::L1, vec![]).await.unwrap();

        assert!(factory.call(&handle, Bytes::new()).await.is_ok());

        let stranger = ComponentHandle { address: Address::ZERO, ..handle };
        assert!(matches!(
            factory.call(&stranger, Bytes::new()).await,
            Err(FactoryError::UnknownComponent(_))
        ));
    }
}
