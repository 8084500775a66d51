use std::sync::Arc;
use tracing::info;

use super::{execute_plan, fixture_plan, ComponentSlot};
use crate::chains::{self, select_variant, ChainVariant};
use crate::errors::ProvisionError;
use crate::factory::{ComponentFactory, ComponentHandle};
use crate::models::{Accounts, Transfer};

/// Chain every sample transfer targets
pub const SAMPLE_TRANSFER_CHAIN_ID: u64 = chains::ARBITRUM_TESTNET_3;

/// Everything a bridge test needs: accounts, deployed components and sample transfers.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub variant: ChainVariant,
    pub accounts: Accounts,

    pub l1_canonical_token: ComponentHandle,
    pub l1_messenger: ComponentHandle,
    pub l1_canonical_bridge: ComponentHandle,
    pub l1_bridge: ComponentHandle,
    pub messenger_wrapper: ComponentHandle,

    pub l2_canonical_token: ComponentHandle,
    pub l2_messenger: ComponentHandle,
    pub weth: ComponentHandle,
    pub l2_uniswap_factory: ComponentHandle,
    pub l2_uniswap_router: ComponentHandle,
    pub l2_bridge: ComponentHandle,

    pub accounting: ComponentHandle,
    pub bridge: ComponentHandle,

    pub transfers: Vec<Transfer>,
}

impl Fixture {
    pub fn handles(&self) -> Vec<(ComponentSlot, &ComponentHandle)> {
        vec![
            (ComponentSlot::L1CanonicalToken, &self.l1_canonical_token),
            (ComponentSlot::L1Messenger, &self.l1_messenger),
            (ComponentSlot::L1CanonicalBridge, &self.l1_canonical_bridge),
            (ComponentSlot::L1Bridge, &self.l1_bridge),
            (ComponentSlot::MessengerWrapper, &self.messenger_wrapper),
            (ComponentSlot::L2CanonicalToken, &self.l2_canonical_token),
            (ComponentSlot::L2Messenger, &self.l2_messenger),
            (ComponentSlot::Weth, &self.weth),
            (ComponentSlot::L2UniswapFactory, &self.l2_uniswap_factory),
            (ComponentSlot::L2UniswapRouter, &self.l2_uniswap_router),
            (ComponentSlot::L2Bridge, &self.l2_bridge),
            (ComponentSlot::Accounting, &self.accounting),
            (ComponentSlot::Bridge, &self.bridge),
        ]
    }
}

pub fn sample_transfers(accounts: &Accounts) -> Vec<Transfer> {
    vec![
        Transfer::sample(SAMPLE_TRANSFER_CHAIN_ID, accounts.user, accounts.other_account),
        Transfer::sample(
            SAMPLE_TRANSFER_CHAIN_ID,
            accounts.liquidity_provider,
            accounts.liquidity_provider,
        ),
    ]
}

/// Builds complete bridge fixtures through a component factory.
#[derive(Clone)]
pub struct FixtureProvisioner {
    factory: Arc<dyn ComponentFactory>,
}

impl FixtureProvisioner {
    pub fn new(factory: Arc<dyn ComponentFactory>) -> Self {
        info!("🏭 Creating FixtureProvisioner with {}", factory.description());
        Self { factory }
    }

    /// Provision every component for the L2 identified by `chain_id`.
    ///
    /// Either the whole fixture is returned or an error; an unknown chain id
    /// is rejected before the factory is touched.
    pub async fn provision(&self, chain_id: u64) -> Result<Fixture, ProvisionError> {
        let variant = select_variant(chain_id).ok_or(ProvisionError::UnknownChainVariant(chain_id))?;
        info!(
            "Provisioning {:?} fixture for chain {} ({} / {})",
            variant.family, chain_id, variant.l2_bridge, variant.messenger_wrapper
        );

        let plan = fixture_plan(&variant);

        let available = self.factory.accounts().await.map_err(ProvisionError::Accounts)?;
        let accounts = Accounts::from_available(available)?;

        let mut built = execute_plan(&plan, self.factory.as_ref(), &accounts).await?;
        let transfers = sample_transfers(&accounts);

        let fixture = Fixture {
            variant,
            l1_canonical_token: built.take(ComponentSlot::L1CanonicalToken)?,
            l1_messenger: built.take(ComponentSlot::L1Messenger)?,
            l1_canonical_bridge: built.take(ComponentSlot::L1CanonicalBridge)?,
            l1_bridge: built.take(ComponentSlot::L1Bridge)?,
            messenger_wrapper: built.take(ComponentSlot::MessengerWrapper)?,
            l2_canonical_token: built.take(ComponentSlot::L2CanonicalToken)?,
            l2_messenger: built.take(ComponentSlot::L2Messenger)?,
            weth: built.take(ComponentSlot::Weth)?,
            l2_uniswap_factory: built.take(ComponentSlot::L2UniswapFactory)?,
            l2_uniswap_router: built.take(ComponentSlot::L2UniswapRouter)?,
            l2_bridge: built.take(ComponentSlot::L2Bridge)?,
            accounting: built.take(ComponentSlot::Accounting)?,
            bridge: built.take(ComponentSlot::Bridge)?,
            accounts,
            transfers,
        };

        info!("✅ Fixture provisioned: {} components", fixture.handles().len());
        Ok(fixture)
    }
}
