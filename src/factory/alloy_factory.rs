use alloy::{
    dyn_abi::DynSolValue,
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, Bytes},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::{TransactionReceipt, TransactionRequest},
    signers::local::PrivateKeySigner,
};
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{ArtifactStore, ComponentFactory, ComponentHandle, ComponentTemplate, Layer};
use crate::config::AppConfig;
use crate::errors::FactoryError;

/// Deploys hardhat artifacts to live nodes through alloy providers.
pub struct AlloyComponentFactory {
    l1: DynProvider,
    l2: DynProvider,
    artifacts: ArtifactStore,
    deployer: Address,
    // One deployer key on both layers: submissions are serialized so nonces stay in order
    submit_lock: Mutex<()>,
}

impl AlloyComponentFactory {
    pub fn new(config: &AppConfig) -> Result<Self> {
        info!("🔧 Initializing AlloyComponentFactory");

        let signer: PrivateKeySigner = config
            .deployer
            .private_key
            .parse()
            .map_err(|e| anyhow::anyhow!("Failed to parse private key: {}", e))?;
        let deployer = signer.address();
        let wallet = EthereumWallet::from(signer);

        let l1 = ProviderBuilder::new()
            .wallet(wallet.clone())
            .connect_http(config.chains.l1.rpc_url.parse()?)
            .erased();
        let l2 = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(config.chains.l2.rpc_url.parse()?)
            .erased();

        info!("  Deployer address: {:?}", deployer);
        info!("  L1 RPC: {}", config.chains.l1.rpc_url);
        info!("  L2 RPC: {}", config.chains.l2.rpc_url);
        info!("  Artifacts: {}", config.artifacts.dir);

        Ok(Self {
            l1,
            l2,
            artifacts: ArtifactStore::new(&config.artifacts.dir),
            deployer,
            submit_lock: Mutex::new(()),
        })
    }

    pub fn deployer(&self) -> Address {
        self.deployer
    }

    fn provider(&self, layer: Layer) -> &DynProvider {
        match layer {
            Layer::L1 => &self.l1,
            Layer::L2 => &self.l2,
        }
    }
}

/// Creation bytecode followed by the ABI-encoded constructor arguments
pub fn deployment_code(bytecode: &Bytes, args: &[DynSolValue]) -> Bytes {
    let mut code = bytecode.to_vec();
    if !args.is_empty() {
        code.extend_from_slice(&DynSolValue::Tuple(args.to_vec()).abi_encode_params());
    }
    code.into()
}

/// Address of the contract created by a deployment receipt.
pub fn deployed_address(template: ComponentTemplate, receipt: &TransactionReceipt) -> Result<Address, FactoryError> {
    let rejected = |message: String| FactoryError::Rejected {
        artifact: template.artifact_id().to_string(),
        message,
    };

    if !receipt.status() {
        return Err(rejected(format!("deployment reverted in tx {}", receipt.transaction_hash)));
    }
    receipt
        .contract_address
        .ok_or_else(|| rejected("receipt carries no contract address".to_string()))
}

#[async_trait]
impl ComponentFactory for AlloyComponentFactory {
    async fn accounts(&self) -> Result<Vec<Address>, FactoryError> {
        self.l1
            .get_accounts()
            .await
            .map_err(|e| FactoryError::Provider(e.to_string()))
    }

    async fn create(
        &self,
        template: ComponentTemplate,
        layer: Layer,
        args: Vec<DynSolValue>,
    ) -> Result<ComponentHandle, FactoryError> {
        let rejected = |message: String| FactoryError::Rejected {
            artifact: template.artifact_id().to_string(),
            message,
        };

        let bytecode = self.artifacts.bytecode(template).await?;
        let tx = TransactionRequest::default().with_deploy_code(deployment_code(&bytecode, &args));

        debug!("Deploying {} on {:?} with {} constructor args", template, layer, args.len());

        let receipt = {
            let _guard = self.submit_lock.lock().await;
            self.provider(layer)
                .send_transaction(tx)
                .await
                .map_err(|e| rejected(e.to_string()))?
                .get_receipt()
                .await
                .map_err(|e| rejected(e.to_string()))?
        };

        let address = deployed_address(template, &receipt)?;

        info!("✅ Deployed {} on {:?} at {}", template, layer, address);

        Ok(ComponentHandle {
            address,
            template,
            layer,
            constructor_args: args,
        })
    }

    async fn call(&self, handle: &ComponentHandle, call_data: Bytes) -> Result<Bytes, FactoryError> {
        let tx = TransactionRequest::default()
            .with_to(handle.address)
            .with_input(call_data);

        self.provider(handle.layer)
            .call(tx)
            .await
            .map_err(|e| FactoryError::Provider(e.to_string()))
    }

    fn description(&self) -> &str {
        "AlloyComponentFactory: deploys hardhat artifacts over JSON-RPC"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, b256, U256};
    use serde_json::{json, Value};
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

    const CREATED: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");

    fn receipt(status: &str, contract_address: Option<Address>) -> TransactionReceipt {
        serde_json::from_value(json!({
            "type": "0x2",
            "status": status,
            "cumulativeGasUsed": "0x5208",
            "logs": [],
            "logsBloom": format!("0x{}", "0".repeat(512)),
            "transactionHash": b256!("0x1111111111111111111111111111111111111111111111111111111111111111"),
            "transactionIndex": "0x0",
            "blockHash": b256!("0x2222222222222222222222222222222222222222222222222222222222222222"),
            "blockNumber": "0x1",
            "gasUsed": "0x5208",
            "effectiveGasPrice": "0x1",
            "from": address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            "to": null,
            "contractAddress": contract_address,
        }))
        .unwrap()
    }

    /// Answers a JSON-RPC request with a fixed result, echoing the request id
    struct RpcResult(Value);

    impl Respond for RpcResult {
        fn respond(&self, request: &Request) -> ResponseTemplate {
            let body: Value = serde_json::from_slice(&request.body).unwrap();
            ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": body["id"],
                "result": self.0,
            }))
        }
    }

    async fn mock_rpc(rpc_method: &str, result: Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": rpc_method })))
            .respond_with(RpcResult(result))
            .mount(&server)
            .await;
        server
    }

    fn factory_for(server: &MockServer) -> AlloyComponentFactory {
        let mut config = AppConfig::default();
        config.chains.l1.rpc_url = server.uri();
        config.chains.l2.rpc_url = server.uri();
        config.artifacts.dir = "/nonexistent-artifacts".to_string();
        AlloyComponentFactory::new(&config).unwrap()
    }

    #[test]
    fn test_deployment_code_without_args_is_bytecode() {
        let bytecode = Bytes::from(vec![0x60, 0x80]);
        assert_eq!(deployment_code(&bytecode, &[]), bytecode);
    }

    #[test]
    fn test_deployment_code_appends_encoded_args() {
        let bytecode = Bytes::from(vec![0x60, 0x80]);
        let token = address!("0x7d669A64deb8a4A51eEa755bb0E19FD39CE25Ae9");
        let args = vec![DynSolValue::Address(token), DynSolValue::Uint(U256::from(18), 256)];

        let code = deployment_code(&bytecode, &args);

        assert_eq!(code.len(), 2 + 64);
        assert_eq!(&code[..2], &[0x60, 0x80]);
        assert_eq!(&code[2 + 12..2 + 32], token.as_slice());
        assert_eq!(code[2 + 63], 18);
    }

    #[test]
    fn test_successful_receipt_yields_created_address() {
        let address = deployed_address(ComponentTemplate::MockErc20, &receipt("0x1", Some(CREATED))).unwrap();
        assert_eq!(address, CREATED);
    }

    #[test]
    fn test_reverted_receipt_is_rejected() {
        let err = deployed_address(ComponentTemplate::MockErc20, &receipt("0x0", Some(CREATED))).unwrap_err();

        assert!(matches!(err, FactoryError::Rejected { ref message, .. } if message.contains("reverted")));
    }

    #[test]
    fn test_receipt_without_contract_address_is_rejected() {
        let err = deployed_address(ComponentTemplate::MockL1Bridge, &receipt("0x1", None)).unwrap_err();

        match err {
            FactoryError::Rejected { artifact, message } => {
                assert_eq!(artifact, ComponentTemplate::MockL1Bridge.artifact_id());
                assert!(message.contains("no contract address"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_accounts_come_from_the_l1_node() {
        let server = mock_rpc("eth_accounts", json!([CREATED])).await;

        let accounts = factory_for(&server).accounts().await.unwrap();

        assert_eq!(accounts, vec![CREATED]);
    }

    #[tokio::test]
    async fn test_call_returns_raw_return_data() {
        let server = mock_rpc("eth_call", json!("0x000000000000000000000000000000000000000000000000000000000000002a")).await;
        let handle = ComponentHandle {
            address: CREATED,
            template: ComponentTemplate::MockErc20,
            layer: Layer::L2,
            constructor_args: vec![],
        };

        let data = factory_for(&server).call(&handle, Bytes::from(vec![0x31, 0x3c, 0xe5, 0x67])).await.unwrap();

        assert_eq!(U256::from_be_slice(&data), U256::from(42));
    }

    #[tokio::test]
    async fn test_create_without_artifact_sends_nothing() {
        let server = MockServer::start().await;

        let err = factory_for(&server)
            .create(ComponentTemplate::MockErc20, Layer::L1, vec![])
            .await
            .unwrap_err();

        assert!(matches!(err, FactoryError::ArtifactNotFound { .. }));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }
}
