pub mod json_file;
pub mod memory;

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::networks::{NetworkParameters, PriorState};

pub use json_file::JsonFileStore;
pub use memory::MemoryConfigStore;

/// Durable configuration shared between deployment phases.
///
/// Read once at the start of a pipeline run and written once after the
/// parameters have been resolved and validated.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn read(&self) -> Result<PriorState, StoreError>;

    /// Merge `params` into the stored record
    async fn write(&self, params: &NetworkParameters) -> Result<(), StoreError>;
}

fn merge_params(
    record: &mut serde_json::Map<String, serde_json::Value>,
    params: &NetworkParameters,
) -> Result<(), StoreError> {
    match serde_json::to_value(params)? {
        serde_json::Value::Object(fields) => {
            record.extend(fields);
            Ok(())
        }
        _ => Err(StoreError::NotAnObject("serialized parameters".to_string())),
    }
}
