use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;

use bridge_deployer::config::AppConfig;
use bridge_deployer::pipeline::{DeploymentPipeline, NpmScriptRunner};
use bridge_deployer::storage::JsonFileStore;

// Example usage:
// $ bridge-deployer kovan
// $ bridge-deployer xdai
// $ bridge-deployer optimism
#[derive(Debug, Parser)]
#[command(name = "bridge-deployer", about = "Resolve network parameters and run the bridge deployment scripts")]
struct Cli {
    /// Target network (kovan, optimism, arbitrum, xdai)
    network: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&cli.network).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(network: &str) -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    let store = Arc::new(JsonFileStore::new(&config.persistence.config_file));
    let runner = Arc::new(NpmScriptRunner::new(&config.scripts));

    DeploymentPipeline::new(store, runner).run(network).await?;
    Ok(())
}
