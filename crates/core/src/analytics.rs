use serde::{Deserialize, Serialize};

/// Call metrics attached to a deployment. All zeros today: the provider does
/// not expose call telemetry to us yet, so this is a fixed placeholder shape
/// consumers can already build against.
/// TODO: populate from the provider's call-log endpoint once it ships.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub total_calls: u64,
    pub answered_calls: u64,
    pub average_duration_secs: f64,
    pub containment_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostDelta {
    pub current_monthly: f64,
    pub projected_monthly: f64,
    pub savings_opportunity: f64,
}

/// Read-only companion view of an existing deployment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeploymentAnalysis {
    pub metrics: AnalyticsSnapshot,
    pub suggestions: Vec<String>,
    pub costs: CostDelta,
}

impl DeploymentAnalysis {
    /// The static shape returned while real telemetry is unwired.
    pub fn placeholder() -> Self {
        Self {
            metrics: AnalyticsSnapshot::default(),
            suggestions: vec![
                "Review the assistant's first week of call summaries before tuning prompts."
                    .to_string(),
                "Enable structured-data capture for the fields your CRM needs.".to_string(),
            ],
            costs: CostDelta {
                current_monthly: 0.0,
                projected_monthly: 0.0,
                savings_opportunity: 0.0,
            },
        }
    }
}
