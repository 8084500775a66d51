use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{merge_params, ConfigStore};
use crate::errors::StoreError;
use crate::networks::{NetworkParameters, PriorState};

/// Config record kept as a single JSON object on disk.
///
/// Writes merge into the existing object so keys owned by other phases
/// (deployed addresses, script settings) survive.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    async fn load(&self) -> Result<Map<String, Value>, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config record at {}, starting empty", self.path.display());
                return Ok(Map::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&raw)? {
            Value::Object(record) => Ok(record),
            _ => Err(StoreError::NotAnObject(self.path.display().to_string())),
        }
    }
}

#[async_trait]
impl ConfigStore for JsonFileStore {
    async fn read(&self) -> Result<PriorState, StoreError> {
        let record = self.load().await?;
        Ok(serde_json::from_value(Value::Object(record))?)
    }

    async fn write(&self, params: &NetworkParameters) -> Result<(), StoreError> {
        let mut record = self.load().await?;
        merge_params(&mut record, params)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let mut contents = serde_json::to_string_pretty(&Value::Object(record))?;
        contents.push('\n');
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| self.io_error(e))?;

        info!("Updated config record at {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::networks::{resolve_network_parameters, Network};
    use alloy::primitives::address;

    fn temp_store() -> JsonFileStore {
        let path = std::env::temp_dir()
            .join(format!("bridge-deployer-{}", uuid::Uuid::new_v4()))
            .join("deploy_config.json");
        JsonFileStore::new(path)
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty_prior_state() {
        let store = temp_store();
        assert_eq!(store.read().await.unwrap(), PriorState::default());
    }

    #[tokio::test]
    async fn test_write_then_read_carries_l1_bridge() {
        let store = temp_store();
        let prior = PriorState {
            l1_bridge_address: Some(address!("0x00000000000000000000000000000000000b41d9")),
        };
        let params = Network::Xdai.parameters(&prior);

        store.write(&params).await.unwrap();

        assert_eq!(store.read().await.unwrap(), prior);
    }

    #[tokio::test]
    async fn test_write_keeps_unrelated_keys() {
        let store = temp_store();
        tokio::fs::create_dir_all(store.path().parent().unwrap()).await.unwrap();
        tokio::fs::write(store.path(), r#"{"l2_bridgeAddress":"0xabc","l2_networkName":"old"}"#)
            .await
            .unwrap();

        let params = resolve_network_parameters("optimism", &PriorState::default()).unwrap();
        store.write(&params).await.unwrap();

        let raw = tokio::fs::read_to_string(store.path()).await.unwrap();
        let record: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(record["l2_bridgeAddress"], "0xabc");
        assert_eq!(record["l2_networkName"], "optimism");
        assert_eq!(record["l1_chainId"], "42");
    }

    #[tokio::test]
    async fn test_non_object_record_is_rejected() {
        let store = temp_store();
        tokio::fs::create_dir_all(store.path().parent().unwrap()).await.unwrap();
        tokio::fs::write(store.path(), "[1, 2, 3]").await.unwrap();

        assert!(matches!(store.read().await, Err(StoreError::NotAnObject(_))));
    }

    #[tokio::test]
    async fn test_blank_l1_bridge_on_disk_reads_as_unset() {
        let store = temp_store();
        tokio::fs::create_dir_all(store.path().parent().unwrap()).await.unwrap();
        tokio::fs::write(store.path(), r#"{"l1_bridgeAddress":"","l2_networkName":"xdai"}"#)
            .await
            .unwrap();

        assert_eq!(store.read().await.unwrap(), PriorState::default());
    }
}
