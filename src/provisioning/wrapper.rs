use alloy::dyn_abi::DynSolValue;
use alloy::primitives::B256;

use super::{ComponentSlot, PlanArg};
use crate::chains::ChainFamily;

pub const DEFAULT_MESSENGER_WRAPPER_GAS_LIMIT: u64 = 8_000_000;
pub const DEFAULT_MESSENGER_WRAPPER_SUB_MESSAGE_TYPE: u8 = 0x01;
pub const DEFAULT_MESSENGER_WRAPPER_GAS_PRICE: u64 = 0;
pub const DEFAULT_MESSENGER_WRAPPER_CALL_VALUE: u64 = 0;

/// Constructor arguments for a family's messenger wrapper.
///
/// Arbitrum: `(l1Bridge, l2Bridge, gasLimit, arbChain, subMessageType, gasPrice, callValue)`
/// Optimism: `(l1Bridge, l2Bridge, gasLimit, l1Messenger)`
pub fn messenger_wrapper_args(
    family: ChainFamily,
    l1_bridge: ComponentSlot,
    l2_bridge: ComponentSlot,
    l1_messenger: ComponentSlot,
) -> Vec<PlanArg> {
    let mut args = vec![
        PlanArg::AddressOf(l1_bridge),
        PlanArg::AddressOf(l2_bridge),
        PlanArg::uint(DEFAULT_MESSENGER_WRAPPER_GAS_LIMIT),
        PlanArg::AddressOf(l1_messenger),
    ];

    match family {
        ChainFamily::Arbitrum => {
            args.push(sub_message_type(DEFAULT_MESSENGER_WRAPPER_SUB_MESSAGE_TYPE));
            args.push(PlanArg::uint(DEFAULT_MESSENGER_WRAPPER_GAS_PRICE));
            args.push(PlanArg::uint(DEFAULT_MESSENGER_WRAPPER_CALL_VALUE));
        }
        ChainFamily::Optimism => {}
    }

    args
}

// bytes1, left-aligned in its word
fn sub_message_type(value: u8) -> PlanArg {
    let mut word = B256::ZERO;
    word.0[0] = value;
    PlanArg::Value(DynSolValue::FixedBytes(word, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(family: ChainFamily) -> Vec<PlanArg> {
        messenger_wrapper_args(
            family,
            ComponentSlot::L1Bridge,
            ComponentSlot::L2Bridge,
            ComponentSlot::L1Messenger,
        )
    }

    #[test]
    fn test_optimism_wrapper_takes_four_args() {
        assert_eq!(
            args(ChainFamily::Optimism),
            vec![
                PlanArg::AddressOf(ComponentSlot::L1Bridge),
                PlanArg::AddressOf(ComponentSlot::L2Bridge),
                PlanArg::uint(DEFAULT_MESSENGER_WRAPPER_GAS_LIMIT),
                PlanArg::AddressOf(ComponentSlot::L1Messenger),
            ]
        );
    }

    #[test]
    fn test_arbitrum_wrapper_appends_inbox_defaults() {
        let args = args(ChainFamily::Arbitrum);
        assert_eq!(args.len(), 7);
        assert_eq!(args[3], PlanArg::AddressOf(ComponentSlot::L1Messenger));

        match &args[4] {
            PlanArg::Value(DynSolValue::FixedBytes(word, 1)) => assert_eq!(word[0], 0x01),
            other => panic!("unexpected sub message type {:?}", other),
        }
    }
}
