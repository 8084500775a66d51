use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub deployer: DeployerConfig,
    pub chains: ChainConfig,
    pub artifacts: ArtifactsConfig,
    pub persistence: PersistenceConfig,
    pub scripts: ScriptsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DeployerConfig {
    pub private_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChainConfig {
    pub l1: ChainDetails,
    pub l2: ChainDetails,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChainDetails {
    pub rpc_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ArtifactsConfig {
    pub dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PersistenceConfig {
    /// JSON record shared between deployment phases
    pub config_file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScriptsConfig {
    pub runner: String,
    pub working_dir: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        tracing::info!("Loading configuration...");

        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("BRIDGE_DEPLOYER").separator("__"))
            .build()?;

        let mut config: AppConfig = match settings.try_deserialize() {
            Ok(config) => {
                tracing::info!("Configuration loaded from file/environment");
                config
            }
            Err(e) => {
                tracing::warn!("Could not load configuration from file/environment ({}), using defaults", e);
                AppConfig::default()
            }
        };

        // Override with environment variables if present
        if let Ok(private_key) = std::env::var("DEPLOYER_PRIVATE_KEY") {
            config.deployer.private_key = private_key;
        }

        if let Ok(l1_rpc) = std::env::var("L1_RPC_URL") {
            config.chains.l1.rpc_url = l1_rpc;
        }

        if let Ok(l2_rpc) = std::env::var("L2_RPC_URL") {
            config.chains.l2.rpc_url = l2_rpc;
        }

        tracing::info!("Final configuration:");
        tracing::info!("  L1 chain: {}", config.chains.l1.rpc_url);
        tracing::info!("  L2 chain: {}", config.chains.l2.rpc_url);
        tracing::info!("  Config record: {}", config.persistence.config_file);
        tracing::info!("  Script runner: {} (in {})", config.scripts.runner, config.scripts.working_dir);

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            deployer: DeployerConfig {
                // First default hardhat/anvil dev key
                private_key: "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80".to_string(),
            },
            chains: ChainConfig {
                l1: ChainDetails {
                    rpc_url: "http://localhost:8545".to_string(),
                },
                l2: ChainDetails {
                    rpc_url: "http://localhost:8545".to_string(),
                },
            },
            artifacts: ArtifactsConfig {
                dir: "artifacts".to_string(),
            },
            persistence: PersistenceConfig {
                config_file: "scripts/deploy_config.json".to_string(),
            },
            scripts: ScriptsConfig {
                runner: "npm".to_string(),
                working_dir: ".".to_string(),
            },
        }
    }
}
