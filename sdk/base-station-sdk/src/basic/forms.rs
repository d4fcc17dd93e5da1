use crate::basic::actions::Action;
use crate::core::constants::DEFAULT_TOKEN_SUPPLY;
use crate::error::{Result, StationError};
use crate::registry::ActionRegistry;
use crate::utils;
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Social,
    Token,
    Nft,
}

/// Raw user input for the token launcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenForm {
    pub name: String,
    pub symbol: String,
    pub supply: String,
}

impl Default for TokenForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            symbol: String::new(),
            supply: DEFAULT_TOKEN_SUPPLY.to_string(),
        }
    }
}

impl TokenForm {
    pub fn parse_supply(&self) -> Result<U256> {
        let supply = self.supply.trim();
        if supply.is_empty() {
            return Err(StationError::InvalidArgument(
                "supply must not be empty".to_string(),
            ));
        }
        supply.parse::<U256>().map_err(|_| {
            StationError::InvalidArgument(format!("supply must be a whole number, got {:?}", supply))
        })
    }

    pub fn to_action(&self, registry: &ActionRegistry) -> Result<Action> {
        let supply = self.parse_supply()?;
        Ok(Action::deploy_token(
            registry,
            self.name.trim(),
            self.symbol.trim(),
            supply,
        ))
    }
}

/// Raw user input for the collection launcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionForm {
    pub uri: String,
    pub name: String,
}

impl CollectionForm {
    pub fn to_action(&self, registry: &ActionRegistry) -> Action {
        Action::deploy_collection(registry, self.uri.trim(), self.name.trim())
    }
}

/// Everything the presentation layer used to keep in component state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub account: Option<Address>,
    pub active_tab: Tab,
    pub token: TokenForm,
    pub collection: CollectionForm,
}

impl SessionState {
    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    /// `0x1234...abcd` form for the navbar.
    pub fn short_account(&self) -> Option<String> {
        self.account.as_ref().map(utils::short_address)
    }
}
