//! Specialized strategies for the verticals we have tuned by hand.
//!
//! Each strategy only overrides what differs from the trait defaults; the
//! shared system-message assembly lives on the trait.

use crate::domain::assistant::{AnalysisPlan, VoiceConfig};
use crate::domain::business::BusinessConfig;
use crate::templates::{business_variables, substitute_variables, TemplateStrategy};

#[derive(Clone, Copy, Debug, Default)]
pub struct RetailTemplate;

impl TemplateStrategy for RetailTemplate {
    fn industry(&self) -> &str {
        "retail"
    }

    fn base_prompts(&self) -> Vec<String> {
        vec![
            "Help callers with store hours, product availability, order status, and return \
             policies."
                .to_string(),
            "For order status requests, collect the order number and the name on the order."
                .to_string(),
            "Never promise stock you have not confirmed; offer to check and call back instead."
                .to_string(),
        ]
    }

    fn voice_config(&self) -> VoiceConfig {
        VoiceConfig { provider: "eleven_labs".to_string(), voice_id: "bella".to_string() }
    }

    fn analysis_plan(&self) -> AnalysisPlan {
        AnalysisPlan {
            summary_enabled: true,
            success_evaluation_enabled: true,
            structured_fields: vec![
                "caller_intent".to_string(),
                "order_number".to_string(),
                "follow_up_needed".to_string(),
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RestaurantTemplate;

impl TemplateStrategy for RestaurantTemplate {
    fn industry(&self) -> &str {
        "restaurant"
    }

    fn base_prompts(&self) -> Vec<String> {
        vec![
            "Take reservations: collect party size, date, time, name, and a callback number, \
             then read the details back for confirmation."
                .to_string(),
            "Answer menu questions, including common allergens, and take takeout orders item by \
             item."
                .to_string(),
            "For parties larger than eight, explain that a manager will confirm availability by \
             phone."
                .to_string(),
        ]
    }

    fn voice_config(&self) -> VoiceConfig {
        VoiceConfig { provider: "eleven_labs".to_string(), voice_id: "antoni".to_string() }
    }

    fn optimal_temperature(&self) -> f64 {
        0.8
    }

    fn greeting(&self, config: &BusinessConfig) -> String {
        substitute_variables(
            "Thanks for calling {{business_name}}! Would you like to make a reservation or \
             place an order?",
            &business_variables(config),
        )
    }

    fn analysis_plan(&self) -> AnalysisPlan {
        AnalysisPlan {
            summary_enabled: true,
            success_evaluation_enabled: true,
            structured_fields: vec![
                "reservation_date".to_string(),
                "party_size".to_string(),
                "takeout_order".to_string(),
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DentalTemplate;

impl TemplateStrategy for DentalTemplate {
    fn industry(&self) -> &str {
        "healthcare"
    }

    fn base_prompts(&self) -> Vec<String> {
        vec![
            "You answer for a dental practice. Schedule cleanings, check-ups, and follow-up \
             appointments; collect the patient's name, date of birth, and insurance carrier."
                .to_string(),
            "If a caller describes severe pain, swelling, or dental trauma, treat it as urgent \
             and offer the earliest same-day slot or the emergency line."
                .to_string(),
            "Do not give clinical advice; reception handles scheduling and logistics only."
                .to_string(),
        ]
    }

    fn voice_config(&self) -> VoiceConfig {
        VoiceConfig { provider: "eleven_labs".to_string(), voice_id: "rachel".to_string() }
    }

    fn optimal_temperature(&self) -> f64 {
        0.5
    }

    fn analysis_plan(&self) -> AnalysisPlan {
        AnalysisPlan {
            summary_enabled: true,
            success_evaluation_enabled: true,
            structured_fields: vec![
                "appointment_type".to_string(),
                "urgency".to_string(),
                "insurance_carrier".to_string(),
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ClinicTemplate;

impl TemplateStrategy for ClinicTemplate {
    fn industry(&self) -> &str {
        "healthcare"
    }

    fn base_prompts(&self) -> Vec<String> {
        vec![
            "You answer for a medical clinic. Handle appointment scheduling, prescription refill \
             requests, and general office questions."
                .to_string(),
            "If a caller describes a medical emergency, tell them to hang up and dial emergency \
             services immediately. Do not attempt triage."
                .to_string(),
            "Never discuss test results or diagnoses; route those requests to clinical staff."
                .to_string(),
        ]
    }

    fn voice_config(&self) -> VoiceConfig {
        VoiceConfig { provider: "eleven_labs".to_string(), voice_id: "rachel".to_string() }
    }

    fn optimal_temperature(&self) -> f64 {
        0.4
    }

    fn optimal_tokens(&self) -> u32 {
        200
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LegalTemplate;

impl TemplateStrategy for LegalTemplate {
    fn industry(&self) -> &str {
        "legal"
    }

    fn base_prompts(&self) -> Vec<String> {
        vec![
            "You answer for a law office. Run new-client intake: matter type, opposing party \
             name (for conflict checks), and preferred consultation times."
                .to_string(),
            "Never give legal advice or opinions on a caller's situation; only an attorney can \
             do that."
                .to_string(),
            "Treat every detail a caller shares as confidential and avoid repeating specifics \
             back unnecessarily."
                .to_string(),
        ]
    }

    fn voice_config(&self) -> VoiceConfig {
        VoiceConfig { provider: "eleven_labs".to_string(), voice_id: "daniel".to_string() }
    }

    fn optimal_temperature(&self) -> f64 {
        0.4
    }

    fn analysis_plan(&self) -> AnalysisPlan {
        AnalysisPlan {
            summary_enabled: true,
            success_evaluation_enabled: false,
            structured_fields: vec!["matter_type".to_string(), "conflict_check_name".to_string()],
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RealEstateTemplate;

impl TemplateStrategy for RealEstateTemplate {
    fn industry(&self) -> &str {
        "real_estate"
    }

    fn base_prompts(&self) -> Vec<String> {
        vec![
            "You answer for a real-estate office. Capture buyer and seller leads: name, contact \
             number, budget range, and the neighborhoods they care about."
                .to_string(),
            "Offer to book showings and open-house visits, and confirm which listing the caller \
             is asking about."
                .to_string(),
        ]
    }

    fn voice_config(&self) -> VoiceConfig {
        VoiceConfig { provider: "eleven_labs".to_string(), voice_id: "adam".to_string() }
    }

    fn analysis_plan(&self) -> AnalysisPlan {
        AnalysisPlan {
            summary_enabled: true,
            success_evaluation_enabled: true,
            structured_fields: vec![
                "lead_type".to_string(),
                "budget_range".to_string(),
                "listing_reference".to_string(),
            ],
        }
    }
}
