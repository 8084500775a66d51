//! Error types for parameter resolution, provisioning and deployment

use thiserror::Error;

use crate::networks::ParamField;
use crate::provisioning::ComponentSlot;

/// Failure to map a network name onto a known parameter table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Unsupported network: {0}")]
    UnsupportedNetwork(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Incomplete parameters for {network}: missing {}", format_fields(.missing))]
    IncompleteParameters {
        network: String,
        missing: Vec<ParamField>,
    },
}

/// Errors surfaced by a component factory implementation.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("Artifact not found for {artifact} at {path}")]
    ArtifactNotFound { artifact: String, path: String },

    #[error("Invalid artifact {artifact}: {message}")]
    InvalidArtifact { artifact: String, message: String },

    #[error("Deployment of {artifact} rejected: {message}")]
    Rejected { artifact: String, message: String },

    #[error("Unknown component at {0}")]
    UnknownComponent(alloy::primitives::Address),

    #[error("Provider error: {0}")]
    Provider(String),
}

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("No bridge/wrapper variant for chain id {0}")]
    UnknownChainVariant(u64),

    #[error("Failed to construct {slot}: {source}")]
    ComponentConstructionFailure {
        slot: ComponentSlot,
        #[source]
        source: FactoryError,
    },

    #[error("Fixture needs {required} accounts, factory provided {available}")]
    InsufficientAccounts { required: usize, available: usize },

    #[error("Invalid build plan: {0}")]
    InvalidPlan(String),

    #[error("Account lookup failed: {0}")]
    Accounts(#[source] FactoryError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Config store I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Config store JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config store at {0} does not hold a JSON object")]
    NotAnObject(String),
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to spawn \"{script}\": {source}")]
    Spawn {
        script: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Script \"{script}\" exited with {status}")]
    Failed { script: String, status: String },
}

/// Top-level error for a deployment pipeline run.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Script(#[from] ScriptError),
}

fn format_fields(fields: &[ParamField]) -> String {
    fields
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ")
}
