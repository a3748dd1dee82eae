use serde::{Deserialize, Serialize};

/// Deployment pipeline states. Strictly linear — there is no branching back;
/// `Aborted` is reachable from every working state on provider failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeployState {
    BuildingConfig,
    CreatingAssistant,
    ProvisioningNumber,
    Linking,
    Estimating,
    Done,
    Aborted,
}

/// The unit of work a state performs, used to label failures and log events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployStep {
    BuildConfig,
    CreateAssistant,
    ProvisionNumber,
    Link,
    Estimate,
}

impl std::fmt::Display for DeployStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::BuildConfig => "build_config",
            Self::CreateAssistant => "create_assistant",
            Self::ProvisionNumber => "provision_number",
            Self::Link => "link",
            Self::Estimate => "estimate",
        };
        write!(f, "{name}")
    }
}

impl DeployState {
    /// The single successor of a working state; terminal states have none.
    pub fn next(&self) -> Option<DeployState> {
        match self {
            Self::BuildingConfig => Some(Self::CreatingAssistant),
            Self::CreatingAssistant => Some(Self::ProvisioningNumber),
            Self::ProvisioningNumber => Some(Self::Linking),
            Self::Linking => Some(Self::Estimating),
            Self::Estimating => Some(Self::Done),
            Self::Done | Self::Aborted => None,
        }
    }

    /// The work a state performs before it can advance.
    pub fn step(&self) -> Option<DeployStep> {
        match self {
            Self::BuildingConfig => Some(DeployStep::BuildConfig),
            Self::CreatingAssistant => Some(DeployStep::CreateAssistant),
            Self::ProvisioningNumber => Some(DeployStep::ProvisionNumber),
            Self::Linking => Some(DeployStep::Link),
            Self::Estimating => Some(DeployStep::Estimate),
            Self::Done | Self::Aborted => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }
}
