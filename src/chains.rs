//! Chain identifiers and the chain-family variant selector.
//!
//! A chain family groups the chain ids that share one L2 bridge template and
//! one messenger wrapper template. Supporting another chain of an existing
//! family only needs its id added to the family's set.

use crate::factory::ComponentTemplate;

pub const MAINNET: u64 = 1;
pub const KOVAN: u64 = 42;
pub const XDAI_SOKOL: u64 = 77;
pub const OPTIMISM_HOP_TESTNET: u64 = 69;
pub const OPTIMISM_TESTNET_1: u64 = 420;
pub const OPTIMISM_SYNTHETIX_DEMO: u64 = 300;
pub const ARBITRUM_TESTNET_2: u64 = 152709604825713;
pub const ARBITRUM_TESTNET_3: u64 = 79377087078960;

pub const ARBITRUM_CHAIN_IDS: &[u64] = &[ARBITRUM_TESTNET_2, ARBITRUM_TESTNET_3];
pub const OPTIMISM_CHAIN_IDS: &[u64] = &[OPTIMISM_TESTNET_1, OPTIMISM_SYNTHETIX_DEMO];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainFamily {
    Arbitrum,
    Optimism,
}

impl ChainFamily {
    pub const ALL: [ChainFamily; 2] = [ChainFamily::Arbitrum, ChainFamily::Optimism];

    pub fn chain_ids(self) -> &'static [u64] {
        match self {
            ChainFamily::Arbitrum => ARBITRUM_CHAIN_IDS,
            ChainFamily::Optimism => OPTIMISM_CHAIN_IDS,
        }
    }

    pub fn of(chain_id: u64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|family| family.chain_ids().contains(&chain_id))
    }

    pub fn variant(self) -> ChainVariant {
        match self {
            ChainFamily::Arbitrum => ChainVariant {
                family: self,
                l2_bridge: ComponentTemplate::L2ArbitrumBridge,
                messenger_wrapper: ComponentTemplate::ArbitrumMessengerWrapper,
            },
            ChainFamily::Optimism => ChainVariant {
                family: self,
                l2_bridge: ComponentTemplate::L2OptimismBridge,
                messenger_wrapper: ComponentTemplate::OptimismMessengerWrapper,
            },
        }
    }
}

/// Template pair used to build the chain-specific part of a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainVariant {
    pub family: ChainFamily,
    pub l2_bridge: ComponentTemplate,
    pub messenger_wrapper: ComponentTemplate,
}

/// Returns `None` for chain ids outside every known family. Callers treat that
/// as fatal before building anything.
pub fn select_variant(chain_id: u64) -> Option<ChainVariant> {
    ChainFamily::of(chain_id).map(ChainFamily::variant)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arbitrum_family_selects_arbitrum_templates() {
        for &chain_id in ARBITRUM_CHAIN_IDS {
            let variant = select_variant(chain_id).expect("arbitrum id should have a variant");
            assert_eq!(variant.family, ChainFamily::Arbitrum);
            assert_eq!(variant.l2_bridge, ComponentTemplate::L2ArbitrumBridge);
            assert_eq!(variant.messenger_wrapper, ComponentTemplate::ArbitrumMessengerWrapper);
        }
    }

    #[test]
    fn test_optimism_family_selects_optimism_templates() {
        for &chain_id in OPTIMISM_CHAIN_IDS {
            let variant = select_variant(chain_id).expect("optimism id should have a variant");
            assert_eq!(variant.family, ChainFamily::Optimism);
            assert_eq!(variant.l2_bridge, ComponentTemplate::L2OptimismBridge);
            assert_eq!(variant.messenger_wrapper, ComponentTemplate::OptimismMessengerWrapper);
        }
    }

    #[test]
    fn test_unknown_chain_ids_have_no_variant() {
        for chain_id in [0, MAINNET, KOVAN, XDAI_SOKOL, OPTIMISM_HOP_TESTNET, u64::MAX] {
            assert!(select_variant(chain_id).is_none(), "chain {} should not map", chain_id);
        }
    }

    #[test]
    fn test_families_are_disjoint() {
        for &chain_id in ARBITRUM_CHAIN_IDS {
            assert!(!OPTIMISM_CHAIN_IDS.contains(&chain_id));
        }
    }
}
