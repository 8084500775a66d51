use alloy::primitives::Bytes;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::ComponentTemplate;
use crate::errors::FactoryError;

/// The part of a hardhat artifact JSON needed for deployment
#[derive(Debug, Clone, Deserialize)]
pub struct Artifact {
    #[serde(rename = "contractName")]
    pub contract_name: String,
    pub bytecode: Bytes,
}

/// Loads creation bytecode from a hardhat `artifacts/` directory.
///
/// Layout: `<root>/<source path>/<ContractName>.json`. Loaded artifacts are
/// cached for the lifetime of the store.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
    cache: Arc<RwLock<HashMap<ComponentTemplate, Bytes>>>,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn artifact_path(&self, template: ComponentTemplate) -> PathBuf {
        self.root
            .join(template.source_path())
            .join(format!("{}.json", template.contract_name()))
    }

    pub async fn bytecode(&self, template: ComponentTemplate) -> Result<Bytes, FactoryError> {
        if let Some(code) = self.cache.read().await.get(&template) {
            return Ok(code.clone());
        }

        let path = self.artifact_path(template);
        debug!("Loading artifact {} from {}", template.artifact_id(), path.display());

        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|_| FactoryError::ArtifactNotFound {
                artifact: template.artifact_id().to_string(),
                path: path.display().to_string(),
            })?;

        let code = parse_artifact(template, &raw)?;
        self.cache.write().await.insert(template, code.clone());
        Ok(code)
    }
}

fn parse_artifact(template: ComponentTemplate, raw: &str) -> Result<Bytes, FactoryError> {
    let invalid = |message: String| FactoryError::InvalidArtifact {
        artifact: template.artifact_id().to_string(),
        message,
    };

    let artifact: Artifact = serde_json::from_str(raw).map_err(|e| invalid(e.to_string()))?;

    if artifact.contract_name != template.contract_name() {
        return Err(invalid(format!(
            "artifact is for {}, expected {}",
            artifact.contract_name,
            template.contract_name()
        )));
    }
    // Abstract contracts and interfaces compile to empty bytecode
    if artifact.bytecode.is_empty() {
        return Err(invalid("empty creation bytecode".to_string()));
    }

    Ok(artifact.bytecode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_path_follows_hardhat_layout() {
        let store = ArtifactStore::new("artifacts");
        let path = store.artifact_path(ComponentTemplate::L2ArbitrumBridge);
        assert_eq!(
            path,
            PathBuf::from("artifacts/contracts/bridges/L2_ArbitrumBridge.sol/L2_ArbitrumBridge.json")
        );
    }

    #[test]
    fn test_parse_artifact_reads_bytecode() {
        let raw = r#"{"contractName":"MockERC20","abi":[],"bytecode":"0x6080604052"}"#;
        let code = parse_artifact(ComponentTemplate::MockErc20, raw).unwrap();
        assert_eq!(code.as_ref(), &[0x60, 0x80, 0x60, 0x40, 0x52]);
    }

    #[test]
    fn test_parse_artifact_rejects_wrong_contract_and_empty_code() {
        let wrong = r#"{"contractName":"MockBridge","bytecode":"0x6080"}"#;
        assert!(matches!(
            parse_artifact(ComponentTemplate::MockErc20, wrong),
            Err(FactoryError::InvalidArtifact { .. })
        ));

        let empty = r#"{"contractName":"MockERC20","bytecode":"0x"}"#;
        assert!(matches!(
            parse_artifact(ComponentTemplate::MockErc20, empty),
            Err(FactoryError::InvalidArtifact { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_artifact_is_reported_with_path() {
        let store = ArtifactStore::new("/nonexistent-artifacts");
        let err = store.bytecode(ComponentTemplate::MockBridge).await.unwrap_err();
        assert!(matches!(err, FactoryError::ArtifactNotFound { .. }));
        assert!(err.to_string().contains("Mock_Bridge.json"));
    }
}
