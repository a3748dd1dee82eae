use crate::domain::assistant::{AssistantCreationPayload, ChatMessage, ModelConfig};
use crate::domain::business::BusinessConfig;
use crate::errors::ConfigError;
use crate::templates::TemplateStrategy;

/// Merges a resolved template with the caller's business data into the
/// payload sent to the hosted provider. Template first, caller second: the
/// strategy supplies every default, and the explicit BusinessConfig fields
/// are interpolated into the generated system message rather than dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssistantConfigBuilder;

impl AssistantConfigBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(
        &self,
        config: &BusinessConfig,
        strategy: &dyn TemplateStrategy,
    ) -> Result<AssistantCreationPayload, ConfigError> {
        config.validate()?;

        let system_message = strategy.generate_system_message(config);

        Ok(AssistantCreationPayload {
            name: format!("{} Assistant", config.business_name),
            first_message: strategy.greeting(config),
            model: ModelConfig {
                provider: "openai".to_string(),
                model: "gpt-4o".to_string(),
                temperature: strategy.optimal_temperature(),
                max_tokens: strategy.optimal_tokens(),
                emotion_recognition_enabled: true,
                messages: vec![ChatMessage::system(system_message)],
            },
            voice: strategy.voice_config(),
            transcriber: strategy.transcriber_config(config),
            analysis_plan: strategy.analysis_plan(),
        })
    }
}
