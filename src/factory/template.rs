use serde::{Deserialize, Serialize};
use std::fmt;

/// Deployable contract templates, keyed by their fully qualified hardhat
/// artifact name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentTemplate {
    MockErc20,
    MockL1Messenger,
    MockL2Messenger,
    MockL1CanonicalBridge,
    MockL1Bridge,
    L2ArbitrumBridge,
    L2OptimismBridge,
    ArbitrumMessengerWrapper,
    OptimismMessengerWrapper,
    UniswapV2Factory,
    UniswapV2Router02,
    MockAccounting,
    MockBridge,
}

impl ComponentTemplate {
    /// `<source path>:<contract name>`
    pub fn artifact_id(self) -> &'static str {
        match self {
            ComponentTemplate::MockErc20 => "contracts/test/MockERC20.sol:MockERC20",
            ComponentTemplate::MockL1Messenger => "contracts/test/Mock_L1_Messenger.sol:Mock_L1_Messenger",
            ComponentTemplate::MockL2Messenger => "contracts/test/Mock_L2_Messenger.sol:Mock_L2_Messenger",
            ComponentTemplate::MockL1CanonicalBridge => {
                "contracts/test/Mock_L1_CanonicalBridge.sol:Mock_L1_CanonicalBridge"
            }
            ComponentTemplate::MockL1Bridge => "contracts/test/Mock_L1_Bridge.sol:Mock_L1_Bridge",
            ComponentTemplate::L2ArbitrumBridge => "contracts/bridges/L2_ArbitrumBridge.sol:L2_ArbitrumBridge",
            ComponentTemplate::L2OptimismBridge => "contracts/bridges/L2_OptimismBridge.sol:L2_OptimismBridge",
            ComponentTemplate::ArbitrumMessengerWrapper => {
                "contracts/wrappers/ArbitrumMessengerWrapper.sol:ArbitrumMessengerWrapper"
            }
            ComponentTemplate::OptimismMessengerWrapper => {
                "contracts/wrappers/OptimismMessengerWrapper.sol:OptimismMessengerWrapper"
            }
            ComponentTemplate::UniswapV2Factory => {
                "@uniswap/v2-core/contracts/UniswapV2Factory.sol:UniswapV2Factory"
            }
            ComponentTemplate::UniswapV2Router02 => "contracts/uniswap/UniswapV2Router02.sol:UniswapV2Router02",
            ComponentTemplate::MockAccounting => "contracts/test/Mock_Accounting.sol:Mock_Accounting",
            ComponentTemplate::MockBridge => "contracts/test/Mock_Bridge.sol:Mock_Bridge",
        }
    }

    pub fn contract_name(self) -> &'static str {
        let id = self.artifact_id();
        id.rsplit_once(':').map(|(_, name)| name).unwrap_or(id)
    }

    pub fn source_path(self) -> &'static str {
        let id = self.artifact_id();
        id.rsplit_once(':').map(|(path, _)| path).unwrap_or(id)
    }
}

impl fmt::Display for ComponentTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.contract_name())
    }
}
