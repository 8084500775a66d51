use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::errors::ProvisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountRole {
    User,
    LiquidityProvider,
    Bonder,
    Challenger,
    Governance,
    Relayer,
    OtherAccount,
}

impl AccountRole {
    /// Roles in the order they are taken from the factory's account list
    pub const ALL: [AccountRole; 7] = [
        AccountRole::User,
        AccountRole::LiquidityProvider,
        AccountRole::Bonder,
        AccountRole::Challenger,
        AccountRole::Governance,
        AccountRole::Relayer,
        AccountRole::OtherAccount,
    ];
}

/// Named fixture accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accounts {
    pub user: Address,
    pub liquidity_provider: Address,
    pub bonder: Address,
    pub challenger: Address,
    pub governance: Address,
    pub relayer: Address,
    pub other_account: Address,
    /// Everything the factory offered, including accounts past the named roles
    pub all: Vec<Address>,
}

impl Accounts {
    pub fn from_available(available: Vec<Address>) -> Result<Self, ProvisionError> {
        let required = AccountRole::ALL.len();
        if available.len() < required {
            return Err(ProvisionError::InsufficientAccounts {
                required,
                available: available.len(),
            });
        }

        Ok(Self {
            user: available[0],
            liquidity_provider: available[1],
            bonder: available[2],
            challenger: available[3],
            governance: available[4],
            relayer: available[5],
            other_account: available[6],
            all: available,
        })
    }

    pub fn get(&self, role: AccountRole) -> Address {
        match role {
            AccountRole::User => self.user,
            AccountRole::LiquidityProvider => self.liquidity_provider,
            AccountRole::Bonder => self.bonder,
            AccountRole::Challenger => self.challenger,
            AccountRole::Governance => self.governance,
            AccountRole::Relayer => self.relayer,
            AccountRole::OtherAccount => self.other_account,
        }
    }
}
