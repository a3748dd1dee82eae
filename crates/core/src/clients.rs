//! Abstract interfaces over the two external services the pipeline talks to.
//!
//! Adapters catch every transport and decoding failure at their own edge and
//! convert it into a [`ProviderError`]; nothing else crosses this boundary.
//! The core never constructs HTTP requests itself.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::assistant::AssistantCreationPayload;
use crate::domain::number::{
    AssistantId, CandidateNumber, CarrierNumber, NumberPurchase, NumberSearchCriteria,
    PhoneNumberId, PhoneNumberRecord, PriceQuote,
};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Upstream outage signature. Surfaced to the user with a retry
    /// suggestion; never retried automatically.
    #[error("the service is temporarily unavailable: {message}. Please retry in a few minutes.")]
    Unavailable { message: String },
    #[error("provider rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("could not decode provider response: {0}")]
    Decode(String),
}

impl ProviderError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// The hosted provider's view of an assistant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssistantRecord {
    pub id: AssistantId,
    pub name: String,
    #[serde(default)]
    pub phone_number_id: Option<PhoneNumberId>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Idempotent partial update, keyed by assistant id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number_id: Option<PhoneNumberId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_message: Option<String>,
}

/// Registers a carrier-purchased number with the assistant provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterNumberRequest {
    pub number: String,
    pub carrier_sid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistant_id: Option<AssistantId>,
}

#[async_trait]
pub trait AssistantProviderClient: Send + Sync {
    async fn create(
        &self,
        payload: &AssistantCreationPayload,
    ) -> Result<AssistantRecord, ProviderError>;

    async fn get(&self, id: &AssistantId) -> Result<AssistantRecord, ProviderError>;

    async fn list(&self, opts: ListOptions) -> Result<Vec<AssistantRecord>, ProviderError>;

    async fn update(
        &self,
        id: &AssistantId,
        patch: &AssistantPatch,
    ) -> Result<AssistantRecord, ProviderError>;

    async fn delete(&self, id: &AssistantId) -> Result<(), ProviderError>;

    async fn register_number(
        &self,
        request: &RegisterNumberRequest,
    ) -> Result<PhoneNumberRecord, ProviderError>;
}

#[async_trait]
pub trait CarrierClient: Send + Sync {
    async fn search_numbers(
        &self,
        criteria: &NumberSearchCriteria,
    ) -> Result<Vec<CandidateNumber>, ProviderError>;

    async fn get_pricing(&self, country: &str) -> Result<Vec<PriceQuote>, ProviderError>;

    async fn purchase_number(
        &self,
        details: &NumberPurchase,
    ) -> Result<CarrierNumber, ProviderError>;
}
