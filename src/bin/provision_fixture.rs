//! Provision a full bridge fixture against the configured dev node(s) and
//! print the resulting topology as JSON.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use bridge_deployer::config::AppConfig;
use bridge_deployer::factory::AlloyComponentFactory;
use bridge_deployer::FixtureProvisioner;

#[derive(Debug, Parser)]
#[command(name = "provision_fixture", about = "Deploy the bridge test topology for an L2 chain id")]
struct Args {
    /// L2 chain id selecting the bridge/wrapper variant
    chain_id: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = AppConfig::load()?;

    let factory = AlloyComponentFactory::new(&config)?;
    info!("Deploying as {:?}", factory.deployer());

    let provisioner = FixtureProvisioner::new(Arc::new(factory));
    let fixture = provisioner.provision(args.chain_id).await?;

    let components: serde_json::Map<String, serde_json::Value> = fixture
        .handles()
        .into_iter()
        .map(|(slot, handle)| (slot.to_string(), serde_json::json!(handle.address)))
        .collect();

    let summary = serde_json::json!({
        "family": format!("{:?}", fixture.variant.family),
        "components": components,
        "accounts": fixture.accounts,
        "transfers": fixture
            .transfers
            .iter()
            .map(|t| serde_json::json!({ "transfer": t, "hash": t.transfer_hash() }))
            .collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
