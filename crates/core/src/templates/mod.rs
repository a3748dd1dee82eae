//! Industry conversation templates and their resolver.
//!
//! A template strategy supplies everything industry-specific about an
//! assistant: prompt text, voice defaults, model tuning, and the analysis
//! plan. Resolution is a total function — an unknown vertical gets the
//! generic fallback rather than an error, so a deployment is never blocked
//! on an industry we have not seen before.

pub mod default;
pub mod industries;

use std::collections::HashMap;

use crate::domain::assistant::{AnalysisPlan, TranscriberConfig, VoiceConfig};
use crate::domain::business::{BusinessConfig, Tone};
use self::default::DefaultTemplate;
use self::industries::{
    ClinicTemplate, DentalTemplate, LegalTemplate, RealEstateTemplate, RestaurantTemplate,
    RetailTemplate,
};

pub trait TemplateStrategy: Send + Sync {
    /// Normalized industry key this strategy was resolved for.
    fn industry(&self) -> &str;

    /// Industry prompt sections, most specific first. Joined into the system
    /// message together with the generic sections.
    fn base_prompts(&self) -> Vec<String>;

    fn voice_config(&self) -> VoiceConfig {
        VoiceConfig { provider: "eleven_labs".to_string(), voice_id: "nova".to_string() }
    }

    fn optimal_temperature(&self) -> f64 {
        0.7
    }

    fn optimal_tokens(&self) -> u32 {
        250
    }

    fn analysis_plan(&self) -> AnalysisPlan {
        AnalysisPlan {
            summary_enabled: true,
            success_evaluation_enabled: true,
            structured_fields: vec!["caller_intent".to_string(), "follow_up_needed".to_string()],
        }
    }

    fn transcriber_config(&self, config: &BusinessConfig) -> TranscriberConfig {
        TranscriberConfig {
            provider: "deepgram".to_string(),
            model: "nova-2".to_string(),
            language: config.primary_language().to_string(),
        }
    }

    fn business_hours_handling(&self) -> String {
        "Outside business hours, take a message with the caller's name and number and promise a \
         callback on the next business day."
            .to_string()
    }

    fn failover_behavior(&self) -> String {
        "If you cannot help with a request, offer to take a message for a human team member \
         rather than guessing."
            .to_string()
    }

    fn greeting(&self, config: &BusinessConfig) -> String {
        substitute_variables(
            "Thank you for calling {{business_name}}! How can I help you today?",
            &business_variables(config),
        )
    }

    /// Full system message: industry sections first, then the business
    /// specifics interpolated from the caller's config. Never empty — the
    /// generic sections are always appended.
    fn generate_system_message(&self, config: &BusinessConfig) -> String {
        let variables = business_variables(config);
        let mut sections = Vec::new();

        sections.push(substitute_variables(
            "You are the voice assistant for {{business_name}}, a {{industry}} business.",
            &variables,
        ));
        for prompt in self.base_prompts() {
            sections.push(substitute_variables(&prompt, &variables));
        }

        sections.push(tone_guidance(config.tone).to_string());
        sections.push(substitute_variables(
            "Speak {{languages}}; default to {{primary_language}}.",
            &variables,
        ));

        match config.hours_summary() {
            Some(hours) => sections.push(format!(
                "Business hours: {hours}. {}",
                self.business_hours_handling()
            )),
            None => sections.push(self.business_hours_handling()),
        }
        sections.push(self.failover_behavior());

        if let Some(instructions) = &config.custom_instructions {
            if !instructions.trim().is_empty() {
                sections.push(format!("Additional instructions from the business: {instructions}"));
            }
        }

        sections.join("\n\n")
    }
}

fn tone_guidance(tone: Tone) -> &'static str {
    match tone {
        Tone::Professional => {
            "Keep a professional, courteous tone. Be precise and avoid slang."
        }
        Tone::Friendly => {
            "Keep a warm, friendly tone. Be personable while staying efficient."
        }
        Tone::Casual => "Keep a relaxed, casual tone, like a helpful neighbor.",
    }
}

/// Variable map shared by greetings, system messages, and the quick-start
/// guide. Substitution is `{{key}}` replacement; unknown keys pass through
/// untouched.
pub fn business_variables(config: &BusinessConfig) -> HashMap<String, String> {
    let mut variables = HashMap::new();
    variables.insert("business_name".to_string(), config.business_name.clone());
    variables.insert("industry".to_string(), config.industry.clone());
    variables.insert("languages".to_string(), config.languages.join(", "));
    variables.insert("primary_language".to_string(), config.primary_language().to_string());
    variables.insert("tone".to_string(), config.tone.as_str().to_string());
    if let Some(region) = &config.region {
        variables.insert("region".to_string(), region.clone());
    }
    variables
}

pub fn substitute_variables(template: &str, variables: &HashMap<String, String>) -> String {
    let mut output = template.to_string();
    for (key, value) in variables {
        output = output.replace(&format!("{{{{{key}}}}}"), value);
    }
    output
}

struct Registration {
    industry: &'static str,
    subtype: Option<&'static str>,
    build: fn(&str) -> Box<dyn TemplateStrategy>,
}

const REGISTRY: &[Registration] = &[
    Registration { industry: "retail", subtype: None, build: |_| Box::new(RetailTemplate) },
    Registration { industry: "restaurant", subtype: None, build: |_| Box::new(RestaurantTemplate) },
    Registration {
        industry: "healthcare",
        subtype: Some("dental"),
        build: |_| Box::new(DentalTemplate),
    },
    Registration {
        industry: "healthcare",
        subtype: Some("clinic"),
        build: |_| Box::new(ClinicTemplate),
    },
    Registration { industry: "healthcare", subtype: None, build: |_| Box::new(ClinicTemplate) },
    Registration { industry: "legal", subtype: None, build: |_| Box::new(LegalTemplate) },
    Registration {
        industry: "real_estate",
        subtype: None,
        build: |_| Box::new(RealEstateTemplate),
    },
];

#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateResolver;

impl TemplateResolver {
    pub fn new() -> Self {
        Self
    }

    /// Total lookup: exact (industry, subtype) registration, then the
    /// industry-level registration, then the generic fallback with its
    /// industry fragment table. Never fails.
    pub fn resolve(&self, industry: &str, subtype: Option<&str>) -> Box<dyn TemplateStrategy> {
        let industry_key = normalize_key(industry);

        if let Some(subtype) = subtype {
            let subtype_key = normalize_key(subtype);
            let exact = REGISTRY.iter().find(|registration| {
                registration.industry == industry_key
                    && registration.subtype == Some(subtype_key.as_str())
            });
            if let Some(registration) = exact {
                return (registration.build)(&industry_key);
            }
        }

        let industry_level = REGISTRY.iter().find(|registration| {
            registration.industry == industry_key && registration.subtype.is_none()
        });
        if let Some(registration) = industry_level {
            return (registration.build)(&industry_key);
        }

        Box::new(DefaultTemplate::new(&industry_key))
    }
}

pub(crate) fn normalize_key(input: &str) -> String {
    input.trim().to_ascii_lowercase().replace([' ', '-'], "_")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::domain::business::{BusinessConfig, Tone};

    use super::{substitute_variables, TemplateResolver};

    fn config(industry: &str, subtype: Option<&str>) -> BusinessConfig {
        BusinessConfig {
            business_name: "Acme".to_string(),
            industry: industry.to_string(),
            subtype: subtype.map(str::to_string),
            size: None,
            region: None,
            expected_call_volume: 10,
            business_hours: None,
            languages: vec!["en".to_string(), "es".to_string()],
            tone: Tone::Professional,
            custom_instructions: Some("Mention the loyalty program.".to_string()),
        }
    }

    #[test]
    fn resolution_is_total_and_messages_are_never_empty() {
        let resolver = TemplateResolver::new();
        let pairs: &[(&str, Option<&str>)] = &[
            ("retail", None),
            ("restaurant", None),
            ("healthcare", Some("dental")),
            ("healthcare", Some("clinic")),
            ("healthcare", Some("surgery")),
            ("healthcare", None),
            ("legal", None),
            ("real_estate", None),
            ("automotive", None),
            ("fitness", Some("yoga")),
            ("underwater-basket-weaving", None),
            ("", None),
        ];

        for (industry, subtype) in pairs {
            let strategy = resolver.resolve(industry, *subtype);
            let message = strategy.generate_system_message(&config(industry, *subtype));
            assert!(
                !message.is_empty(),
                "system message must not be empty for ({industry}, {subtype:?})"
            );
            assert!(message.contains("Acme"), "business name must be interpolated");
        }
    }

    #[test]
    fn subtype_registration_wins_over_industry_default() {
        let resolver = TemplateResolver::new();
        let dental = resolver.resolve("healthcare", Some("dental"));
        let generic = resolver.resolve("healthcare", None);

        let config = config("healthcare", Some("dental"));
        let dental_message = dental.generate_system_message(&config);
        let generic_message = generic.generate_system_message(&config);

        assert!(dental_message.contains("dental"));
        assert_ne!(dental_message, generic_message);
    }

    #[test]
    fn unknown_subtype_falls_back_to_industry_default() {
        let resolver = TemplateResolver::new();
        let strategy = resolver.resolve("healthcare", Some("surgery"));
        assert_eq!(strategy.industry(), "healthcare");
    }

    #[test]
    fn industry_key_normalization_tolerates_spacing_and_case() {
        let resolver = TemplateResolver::new();
        let strategy = resolver.resolve("  Real Estate ", None);
        assert_eq!(strategy.industry(), "real_estate");
    }

    #[test]
    fn custom_instructions_are_interpolated_not_dropped() {
        let resolver = TemplateResolver::new();
        let strategy = resolver.resolve("retail", None);
        let message = strategy.generate_system_message(&config("retail", None));
        assert!(message.contains("Mention the loyalty program."));
    }

    #[test]
    fn languages_and_tone_shape_the_message() {
        let resolver = TemplateResolver::new();
        let strategy = resolver.resolve("retail", None);
        let mut friendly = config("retail", None);
        friendly.tone = Tone::Friendly;

        let message = strategy.generate_system_message(&friendly);
        assert!(message.contains("en, es"));
        assert!(message.contains("friendly tone"));
    }

    #[test]
    fn substitution_replaces_known_keys_and_keeps_unknown_ones() {
        let variables = HashMap::from([("name".to_string(), "Acme".to_string())]);
        let output = substitute_variables("{{name}} / {{missing}}", &variables);
        assert_eq!(output, "Acme / {{missing}}");
    }
}
