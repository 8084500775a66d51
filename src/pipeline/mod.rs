//! Deployment pipeline: resolve, validate, persist, then run the network's
//! deployment scripts one after another.

pub mod scripts;

use std::sync::Arc;
use tracing::{info, warn};

pub use scripts::*;

use crate::errors::DeployError;
use crate::networks::{validate_complete, Network, NetworkParameters};
use crate::storage::ConfigStore;

pub struct DeploymentPipeline {
    store: Arc<dyn ConfigStore>,
    runner: Arc<dyn ScriptRunner>,
}

impl DeploymentPipeline {
    pub fn new(store: Arc<dyn ConfigStore>, runner: Arc<dyn ScriptRunner>) -> Self {
        Self { store, runner }
    }

    /// Resolve and validate parameters for `network_name` without touching the
    /// store or running anything.
    pub async fn prepare(&self, network_name: &str) -> Result<(Network, NetworkParameters), DeployError> {
        let network: Network = network_name.parse()?;
        let prior = self.store.read().await?;
        let params = network.parameters(&prior);

        if network.is_bootstrap() {
            info!("{} is the L1 bootstrap network, skipping completeness check", network);
        } else {
            validate_complete(&params)?;
            if params.l1_token_bridge_address.is_none() {
                warn!("⚠️ No L1 token bridge address configured for {}", network);
            }
        }

        Ok((network, params))
    }

    pub async fn run(&self, network_name: &str) -> Result<NetworkParameters, DeployError> {
        info!("deploy script initiated");

        let (network, params) = self.prepare(network_name).await?;
        self.store.write(&params).await?;

        let scripts = deployment_scripts(network);
        for (index, script) in scripts.iter().enumerate() {
            info!("executing script {}/{} \"{}\"", index + 1, scripts.len(), script);
            self.runner.run(script).await?;
        }

        info!("complete");
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ResolveError, ScriptError, ValidationError};
    use crate::networks::{ParamField, PriorState};
    use crate::storage::MemoryConfigStore;
    use alloy::primitives::address;
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingRunner {
        ran: Mutex<Vec<String>>,
        fail_on: Option<String>,
    }

    #[async_trait]
    impl ScriptRunner for RecordingRunner {
        async fn run(&self, script: &str) -> Result<(), ScriptError> {
            self.ran.lock().await.push(script.to_string());
            if self.fail_on.as_deref() == Some(script) {
                return Err(ScriptError::Failed {
                    script: script.to_string(),
                    status: "exit status: 1".to_string(),
                });
            }
            Ok(())
        }
    }

    fn prior() -> PriorState {
        PriorState {
            l1_bridge_address: Some(address!("0x00000000000000000000000000000000000b41d9")),
        }
    }

    async fn pipeline(prior: PriorState, runner: Arc<RecordingRunner>) -> (DeploymentPipeline, MemoryConfigStore) {
        let store = MemoryConfigStore::with_prior(&prior).await.unwrap();
        (DeploymentPipeline::new(Arc::new(store.clone()), runner), store)
    }

    #[tokio::test]
    async fn test_bootstrap_runs_one_script_and_persists() {
        let runner = Arc::new(RecordingRunner::default());
        let (pipeline, store) = pipeline(PriorState::default(), runner.clone()).await;

        let params = pipeline.run("kovan").await.unwrap();

        assert!(params.l2_chain_id.is_none());
        assert_eq!(*runner.ran.lock().await, vec!["deploy:l1-kovan"]);
        assert_eq!(store.write_count().await, 1);
        assert_eq!(store.record().await["l1_chainId"], "42");
    }

    #[tokio::test]
    async fn test_l2_network_runs_three_scripts_in_order() {
        let runner = Arc::new(RecordingRunner::default());
        let (pipeline, store) = pipeline(prior(), runner.clone()).await;

        let params = pipeline.run("optimism").await.unwrap();

        assert_eq!(params.l1_bridge_address, prior().l1_bridge_address);
        assert_eq!(
            *runner.ran.lock().await,
            vec!["deploy:l2-optimism", "setup:l1-kovan", "setup:l2-optimism"]
        );
        assert_eq!(store.record().await["l2_networkName"], "optimism");
    }

    #[tokio::test]
    async fn test_unsupported_network_writes_and_runs_nothing() {
        let runner = Arc::new(RecordingRunner::default());
        let (pipeline, store) = pipeline(prior(), runner.clone()).await;

        let err = pipeline.run("ropsten").await.unwrap_err();

        assert!(matches!(
            err,
            DeployError::Resolve(ResolveError::UnsupportedNetwork(ref name)) if name == "ropsten"
        ));
        assert_eq!(store.write_count().await, 0);
        assert!(runner.ran.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_incomplete_parameters_write_and_run_nothing() {
        let runner = Arc::new(RecordingRunner::default());
        let (pipeline, store) = pipeline(PriorState::default(), runner.clone()).await;

        let err = pipeline.run("arbitrum").await.unwrap_err();

        match err {
            DeployError::Validation(ValidationError::IncompleteParameters { missing, network }) => {
                assert_eq!(network, "arbitrum");
                assert_eq!(missing, vec![ParamField::L1BridgeAddress]);
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(store.write_count().await, 0);
        assert!(runner.ran.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_unset_token_bridge_does_not_block_deployment() {
        let runner = Arc::new(RecordingRunner::default());
        let (pipeline, store) = pipeline(prior(), runner.clone()).await;

        let params = pipeline.run("arbitrum").await.unwrap();

        assert!(params.l1_token_bridge_address.is_none());
        assert_eq!(store.write_count().await, 1);
        assert_eq!(runner.ran.lock().await.len(), 3);
    }

    #[tokio::test]
    async fn test_failing_script_stops_the_sequence() {
        let runner = Arc::new(RecordingRunner {
            fail_on: Some("setup:l1-kovan".to_string()),
            ..Default::default()
        });
        let (pipeline, _store) = pipeline(prior(), runner.clone()).await;

        let err = pipeline.run("xdai").await.unwrap_err();

        assert!(matches!(err, DeployError::Script(ScriptError::Failed { .. })));
        assert_eq!(*runner.ran.lock().await, vec!["deploy:l2-xdai", "setup:l1-kovan"]);
    }

    #[tokio::test]
    async fn test_blank_persisted_l1_bridge_is_reported_as_missing() {
        let runner = Arc::new(RecordingRunner::default());
        let mut record = serde_json::Map::new();
        record.insert("l1_bridgeAddress".to_string(), serde_json::Value::from(""));
        let store = MemoryConfigStore::with_record(record);
        let pipeline = DeploymentPipeline::new(Arc::new(store.clone()), runner.clone());

        let err = pipeline.run("optimism").await.unwrap_err();

        match err {
            DeployError::Validation(ValidationError::IncompleteParameters { missing, .. }) => {
                assert_eq!(missing, vec![ParamField::L1BridgeAddress]);
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(store.write_count().await, 0);
        assert!(runner.ran.lock().await.is_empty());
    }
}
