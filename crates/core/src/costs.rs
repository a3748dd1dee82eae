use serde::{Deserialize, Serialize};

use crate::domain::business::BusinessConfig;

/// Flat platform fee per month, USD.
const BASE_MONTHLY: f64 = 50.0;
/// Marginal cost per handled call, USD.
const PER_CALL_COST: f64 = 0.05;
/// `expected_call_volume` is a daily figure; months are billed at 22
/// business days.
const BUSINESS_DAYS_PER_MONTH: f64 = 22.0;

const ASSISTANT_SHARE: f64 = 0.6;
const PHONE_NUMBER_SHARE: f64 = 0.3;
const ANALYTICS_SHARE: f64 = 0.1;

/// Monthly estimate split across the three line items. The shares always sum
/// to `monthly`. Values are raw f64; display rounding is the caller's job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub monthly: f64,
    pub per_call: f64,
    pub breakdown: CostShares,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostShares {
    pub assistant: f64,
    pub phone_number: f64,
    pub analytics: f64,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CostEstimator;

impl CostEstimator {
    pub fn new() -> Self {
        Self
    }

    pub fn estimate(&self, config: &BusinessConfig) -> CostBreakdown {
        let estimated_monthly_calls = f64::from(config.expected_call_volume)
            * BUSINESS_DAYS_PER_MONTH;
        let monthly = BASE_MONTHLY + estimated_monthly_calls * PER_CALL_COST;

        CostBreakdown {
            monthly,
            per_call: PER_CALL_COST,
            breakdown: CostShares {
                assistant: monthly * ASSISTANT_SHARE,
                phone_number: monthly * PHONE_NUMBER_SHARE,
                analytics: monthly * ANALYTICS_SHARE,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::business::{BusinessConfig, Tone};

    use super::CostEstimator;

    fn config(expected_call_volume: u32) -> BusinessConfig {
        BusinessConfig {
            business_name: "Test Retail Store".to_string(),
            industry: "retail".to_string(),
            subtype: None,
            size: None,
            region: None,
            expected_call_volume,
            business_hours: None,
            languages: vec!["en".to_string()],
            tone: Tone::Friendly,
            custom_instructions: None,
        }
    }

    #[test]
    fn monthly_follows_the_fixed_formula() {
        let estimate = CostEstimator::new().estimate(&config(500));
        assert!((estimate.monthly - 600.0).abs() < f64::EPSILON);
        assert!((estimate.per_call - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn breakdown_components_sum_to_monthly() {
        for volume in [0, 1, 37, 500, 10_000] {
            let estimate = CostEstimator::new().estimate(&config(volume));
            let sum = estimate.breakdown.assistant
                + estimate.breakdown.phone_number
                + estimate.breakdown.analytics;
            assert!(
                (sum - estimate.monthly).abs() < 1e-9,
                "breakdown must sum to monthly for volume {volume}"
            );
        }
    }

    #[test]
    fn zero_volume_still_pays_the_base_fee() {
        let estimate = CostEstimator::new().estimate(&config(0));
        assert!((estimate.monthly - 50.0).abs() < f64::EPSILON);
    }
}
