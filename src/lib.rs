//! Network parameter resolution and fixture provisioning for the L1/L2 token bridge.

pub mod chains;
pub mod config;
pub mod errors;
pub mod factory;
pub mod models;
pub mod networks;
pub mod pipeline;
pub mod provisioning;
pub mod storage;

pub use chains::{select_variant, ChainFamily, ChainVariant};
pub use errors::*;
pub use networks::{resolve_network_parameters, validate_complete, Network, NetworkParameters, PriorState};
pub use provisioning::{Fixture, FixtureProvisioner};
