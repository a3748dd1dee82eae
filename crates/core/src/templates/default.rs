//! Generic fallback template with a per-industry fragment table.
//!
//! Verticals listed here get a one-paragraph industry fragment on top of the
//! generic receptionist guidelines; anything else gets the guidelines alone.
//! Either way the result is a usable template.

use crate::templates::{normalize_key, TemplateStrategy};

const INDUSTRY_FRAGMENTS: &[(&str, &str)] = &[
    (
        "automotive",
        "Help callers book service appointments, quote rough turnaround times, and check on \
         vehicles already in the shop.",
    ),
    (
        "fitness",
        "Handle class schedules, membership questions, and trial bookings; collect a name and \
         number for anything that needs a staff follow-up.",
    ),
    (
        "salon",
        "Book, move, and cancel appointments; note the requested stylist and service when \
         scheduling.",
    ),
    (
        "education",
        "Answer enrollment and schedule questions, and take messages for teachers and \
         administrative staff.",
    ),
    (
        "insurance",
        "Collect policy numbers and claim details, and route billing or coverage questions to a \
         licensed agent.",
    ),
];

const GENERIC_GUIDELINES: &str = "Answer common questions about the business, take structured \
messages, and route anything you cannot resolve to the right person. Confirm names and phone \
numbers by reading them back.";

#[derive(Clone, Debug)]
pub struct DefaultTemplate {
    industry: String,
    fragment: Option<&'static str>,
}

impl DefaultTemplate {
    pub fn new(industry: &str) -> Self {
        let key = normalize_key(industry);
        let fragment = INDUSTRY_FRAGMENTS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, fragment)| *fragment);
        Self { industry: key, fragment }
    }
}

impl TemplateStrategy for DefaultTemplate {
    fn industry(&self) -> &str {
        &self.industry
    }

    fn base_prompts(&self) -> Vec<String> {
        match self.fragment {
            Some(fragment) => vec![fragment.to_string(), GENERIC_GUIDELINES.to_string()],
            None => vec![GENERIC_GUIDELINES.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::templates::TemplateStrategy;

    use super::DefaultTemplate;

    #[test]
    fn known_fragment_is_prepended_to_generic_guidelines() {
        let template = DefaultTemplate::new("automotive");
        let prompts = template.base_prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("service appointments"));
        assert!(prompts[1].contains("structured"));
    }

    #[test]
    fn unknown_industry_gets_generic_guidelines_only() {
        let template = DefaultTemplate::new("space-tourism");
        let prompts = template.base_prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("route anything"));
    }

    #[test]
    fn fragment_lookup_normalizes_the_key() {
        let template = DefaultTemplate::new(" Fitness ");
        assert_eq!(template.base_prompts().len(), 2);
    }
}
