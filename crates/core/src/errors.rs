use thiserror::Error;

use crate::clients::ProviderError;
use crate::domain::number::AssistantId;
use crate::pipeline::states::DeployStep;
use crate::pricing::PricingMismatch;
use crate::provisioner::{ConfirmationFailure, PurchaseError};

/// Rejections raised by local BusinessConfig validation, before any network
/// call is made. Callers decide whether to prompt again or abort.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("business_name must not be empty")]
    MissingBusinessName,
    #[error("languages must contain at least one entry")]
    NoLanguages,
    #[error("languages must not contain blank entries")]
    BlankLanguage,
}

/// What went wrong inside a single pipeline step.
#[derive(Debug, Error)]
pub enum PipelineFailure {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Purchase(#[from] PurchaseError),
}

/// Top-level outcome taxonomy for `deploy_business_assistant`.
///
/// `PurchaseNotConfirmed` is a user abort, not a system failure: nothing has
/// been charged when it is raised. Every variant that can fire after
/// assistant creation carries the assistant id, because the pipeline takes
/// no compensating action — the caller decides what happens to the orphan
/// instead of it being silently left behind.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{mismatch}")]
    Pricing { mismatch: PricingMismatch, assistant_id: Option<AssistantId> },
    #[error("purchase was not confirmed: {failure}")]
    PurchaseNotConfirmed { failure: ConfirmationFailure, assistant_id: Option<AssistantId> },
    #[error("no phone numbers matched the search criteria for {country}/{number_type}")]
    NoNumbersAvailable {
        country: String,
        number_type: String,
        assistant_id: Option<AssistantId>,
    },
    #[error("deployment aborted during {step}: {source}")]
    Aborted {
        step: DeployStep,
        assistant_id: Option<AssistantId>,
        #[source]
        source: PipelineFailure,
    },
}

impl DeployError {
    /// The step the pipeline died in, when it got far enough to have one.
    pub fn failed_step(&self) -> Option<DeployStep> {
        match self {
            Self::Aborted { step, .. } => Some(*step),
            Self::Pricing { .. }
            | Self::PurchaseNotConfirmed { .. }
            | Self::NoNumbersAvailable { .. } => Some(DeployStep::ProvisionNumber),
            Self::Config(_) => None,
        }
    }

    /// Assistant left live and unlinked by a failed run, if any.
    pub fn orphaned_assistant(&self) -> Option<&AssistantId> {
        match self {
            Self::Aborted { assistant_id, .. }
            | Self::Pricing { assistant_id, .. }
            | Self::PurchaseNotConfirmed { assistant_id, .. }
            | Self::NoNumbersAvailable { assistant_id, .. } => assistant_id.as_ref(),
            Self::Config(_) => None,
        }
    }

    /// True when the failure is the user declining the purchase guard.
    pub fn is_user_abort(&self) -> bool {
        matches!(self, Self::PurchaseNotConfirmed { .. })
    }
}
