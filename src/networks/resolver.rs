use alloy::primitives::{address, Address};
use serde::{de::Error, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::NetworkParameters;
use crate::chains;
use crate::errors::ResolveError;

pub const DEFAULT_H_BRIDGE_TOKEN_NAME: &str = "DAI Hop Token";
pub const DEFAULT_H_BRIDGE_TOKEN_SYMBOL: &str = "hDAI";
pub const DEFAULT_H_BRIDGE_TOKEN_DECIMALS: u8 = 18;

const KOVAN_DAI: Address = address!("0x7d669A64deb8a4A51eEa755bb0E19FD39CE25Ae9");

/// Networks a deployment can target.
///
/// `Kovan` is the single-chain bootstrap that deploys the L1 side only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Kovan,
    Optimism,
    Arbitrum,
    Xdai,
}

impl Network {
    pub const ALL: [Network; 4] = [Network::Kovan, Network::Optimism, Network::Arbitrum, Network::Xdai];

    pub fn name(self) -> &'static str {
        match self {
            Network::Kovan => "kovan",
            Network::Optimism => "optimism",
            Network::Arbitrum => "arbitrum",
            Network::Xdai => "xdai",
        }
    }

    pub fn is_bootstrap(self) -> bool {
        matches!(self, Network::Kovan)
    }

    /// Parameter record for this network. `prior` supplies the L1 bridge
    /// address produced by the earlier bootstrap deployment.
    pub fn parameters(self, prior: &PriorState) -> NetworkParameters {
        let l1_bridge_address = prior.l1_bridge_address;

        match self {
            Network::Kovan => NetworkParameters {
                l2_network_name: None,
                l1_chain_id: chains::KOVAN,
                l2_chain_id: None,
                l1_token_bridge_address: None,
                l1_bridge_address: None,
                l1_canonical_token_address: KOVAN_DAI,
                l1_messenger_address: None,
                l2_canonical_token_address: None,
                l2_messenger_address: None,
                l2_h_bridge_token_name: None,
                l2_h_bridge_token_symbol: None,
                l2_h_bridge_token_decimals: None,
            },
            Network::Optimism => NetworkParameters {
                l2_network_name: Some(self.name().to_string()),
                l1_chain_id: chains::KOVAN,
                l2_chain_id: Some(chains::OPTIMISM_HOP_TESTNET),
                l1_token_bridge_address: Some(address!("0xC1e7Be0E1aDD345afB2485aA5E774cD79cBbbBf5")),
                l1_bridge_address,
                l1_canonical_token_address: KOVAN_DAI,
                l1_messenger_address: Some(address!("0xb89065D5eB05Cac554FDB11fC764C679b4202322")),
                l2_canonical_token_address: Some(address!("0x782e1ec5F7381269b2e5DC4eD58648C60161539b")),
                l2_messenger_address: Some(address!("0x4200000000000000000000000000000000000007")),
                ..default_h_bridge_token()
            },
            Network::Arbitrum => NetworkParameters {
                l2_network_name: Some(self.name().to_string()),
                l1_chain_id: chains::KOVAN,
                l2_chain_id: Some(chains::ARBITRUM_TESTNET_3),
                // No canonical token bridge on this testnet yet
                l1_token_bridge_address: None,
                l1_bridge_address,
                l1_canonical_token_address: KOVAN_DAI,
                l1_messenger_address: Some(address!("0xE681857DEfE8b454244e701BA63EfAa078d7eA85")),
                l2_canonical_token_address: Some(KOVAN_DAI),
                l2_messenger_address: Some(address!("0x0000000000000000000000000000000000000064")),
                ..default_h_bridge_token()
            },
            Network::Xdai => NetworkParameters {
                l2_network_name: Some(self.name().to_string()),
                l1_chain_id: chains::KOVAN,
                l2_chain_id: Some(chains::XDAI_SOKOL),
                l1_token_bridge_address: Some(address!("0xA960d095470f7509955d5402e36d9DB984B5C8E2")),
                l1_bridge_address,
                l1_canonical_token_address: KOVAN_DAI,
                l1_messenger_address: Some(address!("0xFe446bEF1DbF7AFE24E81e05BC8B271C1BA9a560")),
                l2_canonical_token_address: Some(address!("0x714983a8Dc3329bf3BeB8F36b49878CF944E5A3B")),
                l2_messenger_address: Some(address!("0x40CdfF886715A4012fAD0219D15C98bB149AeF0e")),
                ..default_h_bridge_token()
            },
        }
    }
}

fn default_h_bridge_token() -> NetworkParameters {
    NetworkParameters {
        l2_network_name: None,
        l1_chain_id: 0,
        l2_chain_id: None,
        l1_token_bridge_address: None,
        l1_bridge_address: None,
        l1_canonical_token_address: Address::ZERO,
        l1_messenger_address: None,
        l2_canonical_token_address: None,
        l2_messenger_address: None,
        l2_h_bridge_token_name: Some(DEFAULT_H_BRIDGE_TOKEN_NAME.to_string()),
        l2_h_bridge_token_symbol: Some(DEFAULT_H_BRIDGE_TOKEN_SYMBOL.to_string()),
        l2_h_bridge_token_decimals: Some(DEFAULT_H_BRIDGE_TOKEN_DECIMALS),
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .into_iter()
            .find(|network| network.name() == s)
            .ok_or_else(|| ResolveError::UnsupportedNetwork(s.to_string()))
    }
}

/// Fields carried over from an earlier deployment phase via the config store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorState {
    #[serde(rename = "l1_bridgeAddress", default, deserialize_with = "blank_address_as_none")]
    pub l1_bridge_address: Option<Address>,
}

// The record keeps the key blank until the L1 bridge is deployed
fn blank_address_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Address>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse::<Address>().map(Some).map_err(D::Error::custom),
        _ => Ok(None),
    }
}

pub fn resolve_network_parameters(
    network_name: &str,
    prior: &PriorState,
) -> Result<NetworkParameters, ResolveError> {
    let network: Network = network_name.parse()?;
    Ok(network.parameters(prior))
}
