//! Quick-start guide attached to every deployment result.

use crate::domain::business::BusinessConfig;
use crate::domain::number::PhoneNumberRecord;
use crate::templates::{business_variables, substitute_variables};

const QUICK_START_TEMPLATE: &str = "\
Your {{business_name}} voice assistant is live.

1. Call {{phone_number}} to hear it answer.
2. Forward your existing business line to {{phone_number}} when you are ready.
3. Calls are answered in {{languages}}; the assistant defaults to {{primary_language}}.
4. Call summaries and captured fields appear in your provider dashboard after each call.
5. To change the greeting or instructions, update the assistant and redeploy — live \
assistants are patched in place, never rebuilt.";

pub fn quick_start_guide(config: &BusinessConfig, number: &PhoneNumberRecord) -> String {
    let mut variables = business_variables(config);
    variables.insert("phone_number".to_string(), number.number.clone());
    substitute_variables(QUICK_START_TEMPLATE, &variables)
}

#[cfg(test)]
mod tests {
    use crate::domain::business::{BusinessConfig, Tone};
    use crate::domain::number::{PhoneNumberId, PhoneNumberRecord};

    use super::quick_start_guide;

    #[test]
    fn guide_names_the_business_and_its_number() {
        let config = BusinessConfig {
            business_name: "Harbor Dental".to_string(),
            industry: "healthcare".to_string(),
            subtype: Some("dental".to_string()),
            size: None,
            region: None,
            expected_call_volume: 40,
            business_hours: None,
            languages: vec!["en".to_string()],
            tone: Tone::Professional,
            custom_instructions: None,
        };
        let number = PhoneNumberRecord {
            id: PhoneNumberId("num_1".to_string()),
            number: "+15125550100".to_string(),
            assistant_id: None,
        };

        let guide = quick_start_guide(&config, &number);
        assert!(guide.contains("Harbor Dental"));
        assert!(guide.contains("+15125550100"));
        assert!(!guide.contains("{{"), "all variables must be substituted");
    }
}
