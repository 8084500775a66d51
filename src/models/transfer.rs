use alloy::primitives::{keccak256, uint, Address, B256, U256};
use alloy::sol_types::SolValue;
use serde::{Deserialize, Serialize};

/// 100 tokens at 18 decimals
pub const TRANSFER_AMOUNT: U256 = uint!(100_000000000000000000_U256);
/// 1 token at 18 decimals
pub const RELAYER_FEE: U256 = uint!(1_000000000000000000_U256);
pub const DEFAULT_DEADLINE: u64 = 9_999_999_999;

/// A cross-chain transfer intent, used as sample input for bridge tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    #[serde(rename = "chainId")]
    pub chain_id: u64,
    pub sender: Address,
    pub recipient: Address,
    pub amount: U256,
    #[serde(rename = "transferNonce")]
    pub transfer_nonce: u64,
    #[serde(rename = "relayerFee")]
    pub relayer_fee: U256,
    #[serde(rename = "amountOutMin")]
    pub amount_out_min: U256,
    pub deadline: U256,
}

impl Transfer {
    /// Sample transfer with the default amount, fee and deadline
    pub fn sample(chain_id: u64, sender: Address, recipient: Address) -> Self {
        Self {
            chain_id,
            sender,
            recipient,
            amount: TRANSFER_AMOUNT,
            transfer_nonce: 0,
            relayer_fee: RELAYER_FEE,
            amount_out_min: U256::ZERO,
            deadline: U256::from(DEFAULT_DEADLINE),
        }
    }

    /// keccak256 of the ABI-encoded transfer, as the bridge computes it.
    /// The sender is not part of the hash.
    pub fn transfer_hash(&self) -> B256 {
        let encoded = (
            U256::from(self.chain_id),
            self.recipient,
            self.amount,
            U256::from(self.transfer_nonce),
            self.relayer_fee,
            self.amount_out_min,
            self.deadline,
        )
            .abi_encode();
        keccak256(encoded)
    }
}
