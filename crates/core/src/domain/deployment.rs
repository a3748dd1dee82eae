use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::AnalyticsSnapshot;
use crate::costs::CostBreakdown;
use crate::domain::number::{AssistantId, PhoneNumberId};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeploymentId(pub String);

impl std::fmt::Display for DeploymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeployedAssistant {
    pub id: AssistantId,
    pub name: String,
    pub phone_number: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedNumber {
    pub id: PhoneNumberId,
    pub number: String,
}

/// The final outcome of one deployment run. Assembled only after every
/// pipeline step has succeeded; the core never persists partial results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeploymentResult {
    pub id: DeploymentId,
    pub assistant: DeployedAssistant,
    pub phone_number: DeployedNumber,
    pub analytics: AnalyticsSnapshot,
    pub quick_start_guide: String,
    pub estimated_costs: CostBreakdown,
    pub created_at: DateTime<Utc>,
}
