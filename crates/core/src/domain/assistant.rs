use serde::{Deserialize, Serialize};

/// The complete assistant-creation payload sent to the hosted provider.
/// Built once per deployment and never mutated afterwards; later changes go
/// through the provider's patch operation keyed by assistant id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantCreationPayload {
    pub name: String,
    pub first_message: String,
    pub model: ModelConfig,
    pub voice: VoiceConfig,
    pub transcriber: TranscriberConfig,
    pub analysis_plan: AnalysisPlan,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub provider: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub emotion_recognition_enabled: bool,
    pub messages: Vec<ChatMessage>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    pub provider: String,
    pub voice_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriberConfig {
    pub provider: String,
    pub model: String,
    pub language: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPlan {
    pub summary_enabled: bool,
    pub success_evaluation_enabled: bool,
    pub structured_fields: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::{
        AnalysisPlan, AssistantCreationPayload, ChatMessage, ModelConfig, TranscriberConfig,
        VoiceConfig,
    };

    #[test]
    fn payload_serializes_to_provider_camel_case() {
        let payload = AssistantCreationPayload {
            name: "Test Retail Store Assistant".to_string(),
            first_message: "Thanks for calling!".to_string(),
            model: ModelConfig {
                provider: "openai".to_string(),
                model: "gpt-4o".to_string(),
                temperature: 0.7,
                max_tokens: 250,
                emotion_recognition_enabled: true,
                messages: vec![ChatMessage::system("You are a retail assistant.")],
            },
            voice: VoiceConfig {
                provider: "eleven_labs".to_string(),
                voice_id: "warm-retail".to_string(),
            },
            transcriber: TranscriberConfig {
                provider: "deepgram".to_string(),
                model: "nova-2".to_string(),
                language: "en".to_string(),
            },
            analysis_plan: AnalysisPlan {
                summary_enabled: true,
                success_evaluation_enabled: true,
                structured_fields: vec!["caller_intent".to_string()],
            },
        };

        let value = serde_json::to_value(&payload).expect("payload serializes");
        assert_eq!(value["firstMessage"], "Thanks for calling!");
        assert_eq!(value["model"]["maxTokens"], 250);
        assert_eq!(value["model"]["emotionRecognitionEnabled"], true);
        assert_eq!(value["voice"]["voiceId"], "warm-retail");
        assert_eq!(value["analysisPlan"]["summaryEnabled"], true);
    }
}
