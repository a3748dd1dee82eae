//! Adapter for the hosted conversational-AI provider's REST API.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use frontdesk_core::config::AssistantProviderConfig;
use frontdesk_core::{
    AssistantCreationPayload, AssistantId, AssistantPatch, AssistantProviderClient,
    AssistantRecord, ListOptions, PhoneNumberId, PhoneNumberRecord, ProviderError,
    RegisterNumberRequest,
};

use crate::classify::{classify_failure, transport_failure};

#[derive(Clone)]
pub struct HostedAssistantClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl HostedAssistantClient {
    pub fn from_config(config: &AssistantProviderConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| ProviderError::Transport(error.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ProviderError> {
        let response = request
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await
            .map_err(transport_failure)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_failure)?;

        if !status.is_success() {
            return Err(classify_failure(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|error| ProviderError::Decode(error.to_string()))
    }

    async fn send_empty(&self, request: reqwest::RequestBuilder) -> Result<(), ProviderError> {
        let response = request
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await
            .map_err(transport_failure)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(transport_failure)?;
            return Err(classify_failure(status.as_u16(), &body));
        }
        Ok(())
    }
}

#[async_trait]
impl AssistantProviderClient for HostedAssistantClient {
    async fn create(
        &self,
        payload: &AssistantCreationPayload,
    ) -> Result<AssistantRecord, ProviderError> {
        debug!(event_name = "provider.assistant_create", name = %payload.name, "creating assistant");
        let wire: AssistantWire =
            self.send(self.http.post(self.url("/assistant")).json(payload)).await?;
        Ok(wire.into())
    }

    async fn get(&self, id: &AssistantId) -> Result<AssistantRecord, ProviderError> {
        let wire: AssistantWire =
            self.send(self.http.get(self.url(&format!("/assistant/{}", id.0)))).await?;
        Ok(wire.into())
    }

    async fn list(&self, opts: ListOptions) -> Result<Vec<AssistantRecord>, ProviderError> {
        let mut request = self.http.get(self.url("/assistant"));
        if let Some(limit) = opts.limit {
            request = request.query(&[("limit", limit)]);
        }
        let wires: Vec<AssistantWire> = self.send(request).await?;
        Ok(wires.into_iter().map(AssistantWire::into).collect())
    }

    async fn update(
        &self,
        id: &AssistantId,
        patch: &AssistantPatch,
    ) -> Result<AssistantRecord, ProviderError> {
        let wire: AssistantWire = self
            .send(self.http.patch(self.url(&format!("/assistant/{}", id.0))).json(patch))
            .await?;
        Ok(wire.into())
    }

    async fn delete(&self, id: &AssistantId) -> Result<(), ProviderError> {
        self.send_empty(self.http.delete(self.url(&format!("/assistant/{}", id.0)))).await
    }

    async fn register_number(
        &self,
        request: &RegisterNumberRequest,
    ) -> Result<PhoneNumberRecord, ProviderError> {
        debug!(
            event_name = "provider.number_register",
            number = %request.number,
            "registering number with assistant provider"
        );
        let body = RegisterNumberWire {
            number: request.number.clone(),
            carrier_sid: request.carrier_sid.clone(),
            assistant_id: request.assistant_id.as_ref().map(|id| id.0.clone()),
        };
        let wire: PhoneNumberWire =
            self.send(self.http.post(self.url("/phone-number")).json(&body)).await?;
        Ok(wire.into())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssistantWire {
    id: String,
    name: String,
    #[serde(default)]
    phone_number_id: Option<String>,
}

impl From<AssistantWire> for AssistantRecord {
    fn from(wire: AssistantWire) -> Self {
        Self {
            id: AssistantId(wire.id),
            name: wire.name,
            phone_number_id: wire.phone_number_id.map(PhoneNumberId),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterNumberWire {
    number: String,
    carrier_sid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    assistant_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PhoneNumberWire {
    id: String,
    number: String,
    #[serde(default)]
    assistant_id: Option<String>,
}

impl From<PhoneNumberWire> for PhoneNumberRecord {
    fn from(wire: PhoneNumberWire) -> Self {
        Self {
            id: PhoneNumberId(wire.id),
            number: wire.number,
            assistant_id: wire.assistant_id.map(AssistantId),
        }
    }
}

#[cfg(test)]
mod tests {
    use frontdesk_core::config::AssistantProviderConfig;
    use frontdesk_core::{AssistantId, AssistantRecord, PhoneNumberRecord};

    use super::{AssistantWire, HostedAssistantClient, PhoneNumberWire, RegisterNumberWire};

    fn config() -> AssistantProviderConfig {
        AssistantProviderConfig {
            api_key: "fk-test".to_string().into(),
            base_url: "https://api.assistant.example.com/v1/".to_string(),
            timeout_secs: 10,
        }
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = HostedAssistantClient::from_config(&config()).expect("client builds");
        assert_eq!(
            client.url("/assistant/asst_1"),
            "https://api.assistant.example.com/v1/assistant/asst_1"
        );
    }

    #[test]
    fn assistant_wire_decodes_provider_camel_case() {
        let record: AssistantRecord = serde_json::from_str::<AssistantWire>(
            r#"{"id":"asst_9","name":"Harbor Dental Assistant","phoneNumberId":"num_3"}"#,
        )
        .expect("wire decodes")
        .into();

        assert_eq!(record.id, AssistantId("asst_9".to_string()));
        assert_eq!(record.phone_number_id.expect("linked").0, "num_3");
    }

    #[test]
    fn phone_number_wire_tolerates_missing_assistant() {
        let record: PhoneNumberRecord = serde_json::from_str::<PhoneNumberWire>(
            r#"{"id":"num_3","number":"+15125550100"}"#,
        )
        .expect("wire decodes")
        .into();

        assert!(record.assistant_id.is_none());
    }

    #[test]
    fn register_wire_omits_absent_assistant_id() {
        let body = RegisterNumberWire {
            number: "+15125550100".to_string(),
            carrier_sid: "PN1".to_string(),
            assistant_id: None,
        };
        let json = serde_json::to_string(&body).expect("serializes");
        assert!(!json.contains("assistantId"));
        assert!(json.contains("carrierSid"));
    }
}
