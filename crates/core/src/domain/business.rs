use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Everything the caller tells us about the business being onboarded.
/// Immutable once a deployment starts; the pipeline owns its copy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusinessConfig {
    pub business_name: String,
    pub industry: String,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// Expected inbound calls per day.
    pub expected_call_volume: u32,
    #[serde(default)]
    pub business_hours: Option<BusinessHours>,
    pub languages: Vec<String>,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub custom_instructions: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub timezone: String,
    pub schedule: Vec<HoursEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursEntry {
    /// e.g. "Mon-Fri" or "Sat"
    pub days: String,
    /// e.g. "09:00-17:00"
    pub hours: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Casual,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Friendly => "friendly",
            Self::Casual => "casual",
        }
    }
}

impl BusinessConfig {
    /// Local validation; runs before any network call is made.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.business_name.trim().is_empty() {
            return Err(ConfigError::MissingBusinessName);
        }
        if self.languages.is_empty() {
            return Err(ConfigError::NoLanguages);
        }
        if self.languages.iter().any(|language| language.trim().is_empty()) {
            return Err(ConfigError::BlankLanguage);
        }
        Ok(())
    }

    /// Primary spoken language, first entry of the ordered list.
    pub fn primary_language(&self) -> &str {
        self.languages.first().map(String::as_str).unwrap_or("en")
    }

    pub fn hours_summary(&self) -> Option<String> {
        let hours = self.business_hours.as_ref()?;
        let entries = hours
            .schedule
            .iter()
            .map(|entry| format!("{} {}", entry.days, entry.hours))
            .collect::<Vec<_>>();
        if entries.is_empty() {
            return None;
        }
        Some(format!("{} ({})", entries.join(", "), hours.timezone))
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::ConfigError;

    use super::{BusinessConfig, BusinessHours, HoursEntry, Tone};

    fn config() -> BusinessConfig {
        BusinessConfig {
            business_name: "Test Retail Store".to_string(),
            industry: "retail".to_string(),
            subtype: None,
            size: Some("small".to_string()),
            region: Some("US".to_string()),
            expected_call_volume: 500,
            business_hours: Some(BusinessHours {
                timezone: "America/New_York".to_string(),
                schedule: vec![HoursEntry {
                    days: "Mon-Fri".to_string(),
                    hours: "09:00-17:00".to_string(),
                }],
            }),
            languages: vec!["en".to_string()],
            tone: Tone::Friendly,
            custom_instructions: None,
        }
    }

    #[test]
    fn accepts_complete_config() {
        config().validate().expect("complete config should validate");
    }

    #[test]
    fn rejects_empty_business_name() {
        let mut invalid = config();
        invalid.business_name = "  ".to_string();
        let error = invalid.validate().expect_err("blank name must be rejected");
        assert!(matches!(error, ConfigError::MissingBusinessName));
    }

    #[test]
    fn rejects_empty_language_list() {
        let mut invalid = config();
        invalid.languages.clear();
        let error = invalid.validate().expect_err("empty languages must be rejected");
        assert!(matches!(error, ConfigError::NoLanguages));
    }

    #[test]
    fn hours_summary_includes_timezone() {
        let summary = config().hours_summary().expect("summary should be present");
        assert!(summary.contains("Mon-Fri 09:00-17:00"));
        assert!(summary.contains("America/New_York"));
    }

    #[test]
    fn loads_from_toml_with_defaults() {
        let parsed: BusinessConfig = toml::from_str(
            r#"
business_name = "Harbor Dental"
industry = "healthcare"
subtype = "dental"
expected_call_volume = 40
languages = ["en", "es"]
"#,
        )
        .expect("minimal document should parse");

        assert_eq!(parsed.tone, Tone::Professional);
        assert_eq!(parsed.primary_language(), "en");
        assert!(parsed.business_hours.is_none());
    }
}
