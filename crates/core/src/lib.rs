pub mod analytics;
pub mod builder;
pub mod clients;
pub mod config;
pub mod costs;
pub mod domain;
pub mod errors;
pub mod guide;
pub mod pipeline;
pub mod pricing;
pub mod provisioner;
pub mod templates;

pub use analytics::{AnalyticsSnapshot, CostDelta, DeploymentAnalysis};
pub use builder::AssistantConfigBuilder;
pub use clients::{
    AssistantPatch, AssistantProviderClient, AssistantRecord, CarrierClient, ListOptions,
    ProviderError, RegisterNumberRequest,
};
pub use costs::{CostBreakdown, CostEstimator};
pub use domain::assistant::{
    AnalysisPlan, AssistantCreationPayload, ChatMessage, ModelConfig, TranscriberConfig,
    VoiceConfig,
};
pub use domain::business::{BusinessConfig, BusinessHours, HoursEntry, Tone};
pub use domain::deployment::{DeployedAssistant, DeployedNumber, DeploymentId, DeploymentResult};
pub use domain::number::{
    AssistantId, CandidateNumber, CarrierNumber, NumberPurchase, NumberSearchCriteria,
    PhoneNumberId, PhoneNumberRecord, PriceQuote,
};
pub use errors::{ConfigError, DeployError, PipelineFailure};
pub use pipeline::engine::{Deployer, NumberOrder};
pub use pipeline::states::{DeployState, DeployStep};
pub use pricing::{match_price, PricingMismatch};
pub use provisioner::{
    ConfirmationFailure, PhoneNumberProvisioner, PurchaseConfirmation, PurchaseError,
};
pub use templates::{TemplateResolver, TemplateStrategy};
