use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::info;

use crate::config::ScriptsConfig;
use crate::errors::ScriptError;
use crate::networks::Network;

/// Runs one named deployment script to completion.
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    async fn run(&self, script: &str) -> Result<(), ScriptError>;
}

/// Runs package scripts as `<runner> run <script>`, inheriting stdio.
#[derive(Debug, Clone)]
pub struct NpmScriptRunner {
    runner: String,
    working_dir: PathBuf,
}

impl NpmScriptRunner {
    pub fn new(config: &ScriptsConfig) -> Self {
        Self {
            runner: config.runner.clone(),
            working_dir: PathBuf::from(&config.working_dir),
        }
    }

    pub fn command_line(&self, script: &str) -> String {
        format!("{} run {}", self.runner, script)
    }
}

#[async_trait]
impl ScriptRunner for NpmScriptRunner {
    async fn run(&self, script: &str) -> Result<(), ScriptError> {
        let command_line = self.command_line(script);
        info!("$ {}", command_line);

        let status = Command::new(&self.runner)
            .arg("run")
            .arg(script)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|source| ScriptError::Spawn {
                script: command_line.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ScriptError::Failed {
                script: command_line,
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

/// Scripts a deployment to `network` runs, in order.
///
/// The bootstrap network only deploys L1. Every other network deploys its L2
/// side, then wires L1 to it, then finishes the L2 setup.
pub fn deployment_scripts(network: Network) -> Vec<String> {
    let l1 = Network::Kovan.name();
    if network.is_bootstrap() {
        return vec![format!("deploy:l1-{}", l1)];
    }

    vec![
        format!("deploy:l2-{}", network.name()),
        format!("setup:l1-{}", l1),
        format!("setup:l2-{}", network.name()),
    ]
}
