use crate::error::{Result, StationError};
use crate::registry::{ActionRegistry, ActionTemplate};
use crate::types::ActionId;
use alloy_primitives::{Address, U256};
use base_station_interface::{AbiValue, FunctionFragment};

/// Kind of social post. The contract stores the kind and a short message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocialKind {
    Gm,
    Gn,
    Custom(String),
}

impl SocialKind {
    pub fn as_str(&self) -> &str {
        match self {
            SocialKind::Gm => "GM",
            SocialKind::Gn => "GN",
            SocialKind::Custom(kind) => kind,
        }
    }

    pub fn message(&self) -> String {
        format!("Based {}!", self.as_str())
    }
}

/// One user invocation: a template with its arguments bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    template: ActionTemplate,
    args: Vec<AbiValue>,
}

impl Action {
    pub fn new(template: ActionTemplate, args: Vec<AbiValue>) -> Self {
        Self { template, args }
    }

    pub fn social_post(registry: &ActionRegistry, kind: SocialKind) -> Self {
        let message = kind.message();
        Self::new(
            registry.template(ActionId::SocialPost),
            vec![kind.as_str().into(), message.into()],
        )
    }

    pub fn mint_pass(registry: &ActionRegistry) -> Self {
        Self::new(registry.template(ActionId::MintPass), Vec::new())
    }

    pub fn tap_counter(registry: &ActionRegistry) -> Self {
        Self::new(registry.template(ActionId::TapCounter), Vec::new())
    }

    pub fn deploy_token(
        registry: &ActionRegistry,
        name: impl Into<String>,
        symbol: impl Into<String>,
        supply: U256,
    ) -> Self {
        Self::new(
            registry.template(ActionId::DeployToken),
            vec![
                AbiValue::String(name.into()),
                AbiValue::String(symbol.into()),
                AbiValue::Uint(supply),
            ],
        )
    }

    /// Note the contract takes the metadata URI first.
    pub fn deploy_collection(
        registry: &ActionRegistry,
        uri: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::new(
            registry.template(ActionId::DeployCollection),
            vec![AbiValue::String(uri.into()), AbiValue::String(name.into())],
        )
    }

    pub fn id(&self) -> ActionId {
        self.template.id
    }

    pub fn template(&self) -> &ActionTemplate {
        &self.template
    }

    pub fn target(&self) -> Address {
        self.template.target
    }

    pub fn value(&self) -> U256 {
        self.template.value
    }

    pub fn function(&self) -> &FunctionFragment {
        &self.template.function
    }

    pub fn args(&self) -> &[AbiValue] {
        &self.args
    }

    pub fn requires_attribution(&self) -> bool {
        self.template.requires_attribution
    }

    pub fn affects_shared_read(&self) -> bool {
        self.template.affects_shared_read()
    }

    /// Reject input the contract would accept but the user clearly did not
    /// mean: blank strings and a zero supply.
    pub fn validate(&self) -> Result<()> {
        let id = self.template.id;
        if self.template.requires_arguments && self.args.is_empty() {
            return Err(StationError::InvalidArgument(format!(
                "{} requires arguments",
                id
            )));
        }
        if !self.template.requires_arguments && !self.args.is_empty() {
            return Err(StationError::InvalidArgument(format!(
                "{} takes no arguments",
                id
            )));
        }
        if !self.template.value.is_zero() && !self.template.function.is_payable() {
            return Err(StationError::InvalidArgument(format!(
                "{} cannot carry value",
                self.template.function.name
            )));
        }

        let inputs = self.template.function.inputs;
        if self.args.len() != inputs.len() {
            return Err(StationError::InvalidArgument(format!(
                "{} expects {} arguments, got {}",
                self.template.id,
                inputs.len(),
                self.args.len()
            )));
        }

        for (param, arg) in inputs.iter().zip(&self.args) {
            match arg {
                AbiValue::String(value) if value.trim().is_empty() => {
                    return Err(StationError::InvalidArgument(format!(
                        "{} must not be empty",
                        param.name
                    )));
                },
                AbiValue::Uint(value) if value.is_zero() => {
                    return Err(StationError::InvalidArgument(format!(
                        "{} must be positive",
                        param.name
                    )));
                },
                _ => {},
            }
        }
        Ok(())
    }
}
