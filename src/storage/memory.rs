use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{merge_params, ConfigStore};
use crate::errors::StoreError;
use crate::networks::{NetworkParameters, PriorState};

#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    record: Arc<RwLock<Map<String, Value>>>,
    writes: Arc<RwLock<usize>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_prior(prior: &PriorState) -> Result<Self, StoreError> {
        let store = Self::new();
        if let Value::Object(fields) = serde_json::to_value(prior)? {
            store.record.write().await.extend(fields);
        }
        Ok(store)
    }

    pub fn with_record(record: Map<String, Value>) -> Self {
        Self {
            record: Arc::new(RwLock::new(record)),
            ..Self::default()
        }
    }

    pub async fn record(&self) -> Map<String, Value> {
        self.record.read().await.clone()
    }

    pub async fn write_count(&self) -> usize {
        *self.writes.read().await
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn read(&self) -> Result<PriorState, StoreError> {
        let record = self.record.read().await.clone();
        Ok(serde_json::from_value(Value::Object(record))?)
    }

    async fn write(&self, params: &NetworkParameters) -> Result<(), StoreError> {
        let mut record = self.record.write().await;
        merge_params(&mut record, params)?;
        *self.writes.write().await += 1;
        Ok(())
    }
}
