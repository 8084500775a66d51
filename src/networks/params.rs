use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ValidationError;

/// Deployment parameters for one L1/L2 network pair.
///
/// Serialized with the key names the downstream deploy and setup scripts read
/// from the persisted config record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkParameters {
    #[serde(rename = "l2_networkName")]
    pub l2_network_name: Option<String>,
    #[serde(rename = "l1_chainId", with = "chain_id_string")]
    pub l1_chain_id: u64,
    #[serde(rename = "l2_chainId", with = "optional_chain_id_string")]
    pub l2_chain_id: Option<u64>,
    #[serde(rename = "l1_tokenBridgeAddress")]
    pub l1_token_bridge_address: Option<Address>,
    #[serde(rename = "l1_bridgeAddress")]
    pub l1_bridge_address: Option<Address>,
    #[serde(rename = "l1_canonicalTokenAddress")]
    pub l1_canonical_token_address: Address,
    #[serde(rename = "l1_messengerAddress")]
    pub l1_messenger_address: Option<Address>,
    #[serde(rename = "l2_canonicalTokenAddress")]
    pub l2_canonical_token_address: Option<Address>,
    #[serde(rename = "l2_messengerAddress")]
    pub l2_messenger_address: Option<Address>,
    #[serde(rename = "l2_hBridgeTokenName")]
    pub l2_h_bridge_token_name: Option<String>,
    #[serde(rename = "l2_hBridgeTokenSymbol")]
    pub l2_h_bridge_token_symbol: Option<String>,
    #[serde(rename = "l2_hBridgeTokenDecimals")]
    pub l2_h_bridge_token_decimals: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRequirement {
    Required,
    Optional,
}

/// Every field of [`NetworkParameters`], with its completeness requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    NetworkName,
    L1ChainId,
    L2ChainId,
    L1TokenBridgeAddress,
    L1BridgeAddress,
    L1CanonicalTokenAddress,
    L1MessengerAddress,
    L2CanonicalTokenAddress,
    L2MessengerAddress,
    L2HBridgeTokenName,
    L2HBridgeTokenSymbol,
    L2HBridgeTokenDecimals,
}

impl ParamField {
    pub const ALL: [ParamField; 12] = [
        ParamField::NetworkName,
        ParamField::L1ChainId,
        ParamField::L2ChainId,
        ParamField::L1TokenBridgeAddress,
        ParamField::L1BridgeAddress,
        ParamField::L1CanonicalTokenAddress,
        ParamField::L1MessengerAddress,
        ParamField::L2CanonicalTokenAddress,
        ParamField::L2MessengerAddress,
        ParamField::L2HBridgeTokenName,
        ParamField::L2HBridgeTokenSymbol,
        ParamField::L2HBridgeTokenDecimals,
    ];

    pub fn requirement(self) -> FieldRequirement {
        match self {
            // The deploy scripts' own input check never required the token bridge
            // (arbitrum has none yet); the pipeline warns when it is unset.
            ParamField::L1TokenBridgeAddress => FieldRequirement::Optional,
            _ => FieldRequirement::Required,
        }
    }

    pub fn required() -> impl Iterator<Item = ParamField> {
        Self::ALL
            .into_iter()
            .filter(|field| field.requirement() == FieldRequirement::Required)
    }

    /// Key used in the persisted config record
    pub fn key(self) -> &'static str {
        match self {
            ParamField::NetworkName => "l2_networkName",
            ParamField::L1ChainId => "l1_chainId",
            ParamField::L2ChainId => "l2_chainId",
            ParamField::L1TokenBridgeAddress => "l1_tokenBridgeAddress",
            ParamField::L1BridgeAddress => "l1_bridgeAddress",
            ParamField::L1CanonicalTokenAddress => "l1_canonicalTokenAddress",
            ParamField::L1MessengerAddress => "l1_messengerAddress",
            ParamField::L2CanonicalTokenAddress => "l2_canonicalTokenAddress",
            ParamField::L2MessengerAddress => "l2_messengerAddress",
            ParamField::L2HBridgeTokenName => "l2_hBridgeTokenName",
            ParamField::L2HBridgeTokenSymbol => "l2_hBridgeTokenSymbol",
            ParamField::L2HBridgeTokenDecimals => "l2_hBridgeTokenDecimals",
        }
    }
}

impl fmt::Display for ParamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn address_present(address: Option<Address>) -> bool {
    address.is_some_and(|a| !a.is_zero())
}

fn text_present(text: Option<&str>) -> bool {
    text.is_some_and(|t| !t.trim().is_empty())
}

impl NetworkParameters {
    /// Whether `field` holds a usable value. Decimals only need to be set.
    pub fn is_present(&self, field: ParamField) -> bool {
        match field {
            ParamField::NetworkName => text_present(self.l2_network_name.as_deref()),
            ParamField::L1ChainId => self.l1_chain_id != 0,
            ParamField::L2ChainId => self.l2_chain_id.is_some_and(|id| id != 0),
            ParamField::L1TokenBridgeAddress => address_present(self.l1_token_bridge_address),
            ParamField::L1BridgeAddress => address_present(self.l1_bridge_address),
            ParamField::L1CanonicalTokenAddress => address_present(Some(self.l1_canonical_token_address)),
            ParamField::L1MessengerAddress => address_present(self.l1_messenger_address),
            ParamField::L2CanonicalTokenAddress => address_present(self.l2_canonical_token_address),
            ParamField::L2MessengerAddress => address_present(self.l2_messenger_address),
            ParamField::L2HBridgeTokenName => text_present(self.l2_h_bridge_token_name.as_deref()),
            ParamField::L2HBridgeTokenSymbol => text_present(self.l2_h_bridge_token_symbol.as_deref()),
            ParamField::L2HBridgeTokenDecimals => self.l2_h_bridge_token_decimals.is_some(),
        }
    }

    pub fn missing_required(&self) -> Vec<ParamField> {
        ParamField::required()
            .filter(|field| !self.is_present(*field))
            .collect()
    }
}

/// Fail-fast completeness gate run before anything is persisted or deployed.
pub fn validate_complete(params: &NetworkParameters) -> Result<(), ValidationError> {
    let missing = params.missing_required();
    if missing.is_empty() {
        return Ok(());
    }

    Err(ValidationError::IncompleteParameters {
        network: params
            .l2_network_name
            .clone()
            .unwrap_or_else(|| "<unnamed>".to_string()),
        missing,
    })
}

// Chain ids are persisted as decimal strings
mod chain_id_string {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(id: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&id.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

mod optional_chain_id_string {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(id: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        match id {
            Some(id) => serializer.serialize_str(&id.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| raw.parse::<u64>().map_err(D::Error::custom))
            .transpose()
    }
}
