use crate::config::StationConfig;
use crate::core::constants::{
    DEPLOY_COLLECTION_FEE, DEPLOY_TOKEN_FEE, MINT_PASS_FEE, SOCIAL_POST_FEE,
};
use crate::error::{Result, StationError};
use crate::types::ActionId;
use alloy_primitives::{Address, U256};
use base_station_interface::contracts::{self, COUNT};
use base_station_interface::FunctionFragment;
use std::collections::BTreeMap;

/// Call shape of an action before user arguments are bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTemplate {
    pub id: ActionId,
    pub target: Address,
    pub function: FunctionFragment,
    /// Native value attached to the call, in wei
    pub value: U256,
    pub requires_arguments: bool,
    pub requires_attribution: bool,
    /// View function to re-read once the write confirms
    pub refresh: Option<FunctionFragment>,
}

impl ActionTemplate {
    pub fn signature(&self) -> String {
        self.function.signature()
    }

    pub fn affects_shared_read(&self) -> bool {
        self.refresh.is_some()
    }
}

/// Static action table with injectable target addresses.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    targets: BTreeMap<ActionId, Address>,
}

impl Default for ActionRegistry {
    fn default() -> Self {
        let targets = BTreeMap::from([
            (ActionId::SocialPost, contracts::SOCIAL_CONTRACT_ADDRESS),
            (ActionId::MintPass, contracts::VIP_PASS_ADDRESS),
            (ActionId::DeployToken, contracts::TOKEN_DEPLOYER_ADDRESS),
            (ActionId::DeployCollection, contracts::NFT_DEPLOYER_ADDRESS),
            (ActionId::TapCounter, contracts::TAP_COUNTER_ADDRESS),
        ]);
        Self { targets }
    }
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &StationConfig) -> Self {
        let mut registry = Self::default();
        registry.set_target(ActionId::TapCounter, config.counter_address);
        for (id, address) in &config.addresses {
            registry.set_target(*id, *address);
        }
        registry
    }

    pub fn set_target(&mut self, id: ActionId, target: Address) {
        self.targets.insert(id, target);
    }

    pub fn target(&self, id: ActionId) -> Address {
        self.targets.get(&id).copied().unwrap_or(Address::ZERO)
    }

    /// Resolve a textual action identifier.
    pub fn resolve(&self, id: &str) -> Result<ActionTemplate> {
        Ok(self.template(id.parse()?))
    }

    pub fn template(&self, id: ActionId) -> ActionTemplate {
        let target = self.target(id);
        match id {
            ActionId::SocialPost => ActionTemplate {
                id,
                target,
                function: contracts::SAY_SOMETHING,
                value: SOCIAL_POST_FEE,
                requires_arguments: true,
                requires_attribution: true,
                refresh: None,
            },
            ActionId::MintPass => ActionTemplate {
                id,
                target,
                function: contracts::MINT,
                value: MINT_PASS_FEE,
                requires_arguments: false,
                requires_attribution: true,
                refresh: None,
            },
            ActionId::DeployToken => ActionTemplate {
                id,
                target,
                function: contracts::DEPLOY_TOKEN,
                value: DEPLOY_TOKEN_FEE,
                requires_arguments: true,
                requires_attribution: true,
                refresh: None,
            },
            ActionId::DeployCollection => ActionTemplate {
                id,
                target,
                function: contracts::DEPLOY_COLLECTION,
                value: DEPLOY_COLLECTION_FEE,
                requires_arguments: true,
                requires_attribution: true,
                refresh: None,
            },
            ActionId::TapCounter => ActionTemplate {
                id,
                target,
                function: contracts::TAP,
                value: U256::ZERO,
                requires_arguments: false,
                requires_attribution: true,
                refresh: Some(COUNT),
            },
        }
    }

    /// Target of the shared counter read.
    pub fn counter_target(&self) -> Address {
        self.target(ActionId::TapCounter)
    }
}

pub(crate) fn ensure_target(template: &ActionTemplate) -> Result<()> {
    if template.target == Address::ZERO {
        return Err(StationError::Config(format!(
            "no contract address configured for {}",
            template.id
        )));
    }
    Ok(())
}
