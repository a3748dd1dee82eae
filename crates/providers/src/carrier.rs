//! Adapter for the telephony carrier's REST API (basic-auth, account SID).

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use frontdesk_core::config::CarrierConfig;
use frontdesk_core::{
    CandidateNumber, CarrierClient, CarrierNumber, NumberPurchase, NumberSearchCriteria,
    PriceQuote, ProviderError,
};

use crate::classify::{classify_failure, transport_failure};

#[derive(Clone)]
pub struct NumberCarrierClient {
    http: reqwest::Client,
    base_url: String,
    account_sid: String,
    auth_token: SecretString,
}

impl NumberCarrierClient {
    pub fn from_config(config: &CarrierConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| ProviderError::Transport(error.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
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
            .basic_auth(&self.account_sid, Some(self.auth_token.expose_secret()))
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
}

#[async_trait]
impl CarrierClient for NumberCarrierClient {
    async fn search_numbers(
        &self,
        criteria: &NumberSearchCriteria,
    ) -> Result<Vec<CandidateNumber>, ProviderError> {
        debug!(
            event_name = "carrier.search",
            country = %criteria.country,
            number_type = %criteria.number_type,
            "searching carrier inventory"
        );

        let mut query: Vec<(&str, String)> = vec![("limit", criteria.limit.to_string())];
        if let Some(area_code) = &criteria.area_code {
            query.push(("areaCode", area_code.clone()));
        }
        if let Some(contains) = &criteria.contains {
            query.push(("contains", contains.clone()));
        }

        let path = format!(
            "/available-numbers/{}/{}",
            criteria.country,
            criteria.number_type.trim().to_ascii_lowercase().replace(' ', "-")
        );
        let wire: SearchResultsWire = self.send(self.http.get(self.url(&path)).query(&query)).await?;
        Ok(wire.numbers.into_iter().map(CandidateWire::into).collect())
    }

    async fn get_pricing(&self, country: &str) -> Result<Vec<PriceQuote>, ProviderError> {
        let wire: PricingWire =
            self.send(self.http.get(self.url(&format!("/pricing/{country}")))).await?;
        Ok(wire.phone_number_prices.into_iter().map(PriceWire::into).collect())
    }

    async fn purchase_number(
        &self,
        details: &NumberPurchase,
    ) -> Result<CarrierNumber, ProviderError> {
        debug!(
            event_name = "carrier.purchase",
            number = %details.phone_number,
            "purchasing number from carrier"
        );
        let body = PurchaseWire { phone_number: details.phone_number.clone() };
        let wire: OwnedNumberWire =
            self.send(self.http.post(self.url("/incoming-numbers")).json(&body)).await?;
        Ok(CarrierNumber { sid: wire.sid, phone_number: wire.phone_number })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResultsWire {
    #[serde(default)]
    numbers: Vec<CandidateWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CandidateWire {
    phone_number: String,
    #[serde(default)]
    friendly_name: Option<String>,
    #[serde(default)]
    locality: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    capabilities: Vec<String>,
}

impl From<CandidateWire> for CandidateNumber {
    fn from(wire: CandidateWire) -> Self {
        let friendly_name = wire.friendly_name.unwrap_or_else(|| wire.phone_number.clone());
        Self {
            phone_number: wire.phone_number,
            friendly_name,
            locality: wire.locality,
            region: wire.region,
            capabilities: wire.capabilities,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PricingWire {
    #[serde(default)]
    phone_number_prices: Vec<PriceWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceWire {
    number_type: String,
    base_price: String,
    current_price: String,
    #[serde(default = "default_price_unit")]
    price_unit: String,
}

fn default_price_unit() -> String {
    "USD".to_string()
}

impl From<PriceWire> for PriceQuote {
    fn from(wire: PriceWire) -> Self {
        Self {
            number_type: wire.number_type,
            base_price: wire.base_price,
            current_price: wire.current_price,
            price_unit: wire.price_unit,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PurchaseWire {
    phone_number: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OwnedNumberWire {
    sid: String,
    phone_number: String,
}

#[cfg(test)]
mod tests {
    use frontdesk_core::config::CarrierConfig;
    use frontdesk_core::{CandidateNumber, PriceQuote};

    use super::{CandidateWire, NumberCarrierClient, PricingWire, SearchResultsWire};

    fn config() -> CarrierConfig {
        CarrierConfig {
            account_sid: "AC123".to_string(),
            auth_token: "token".to_string().into(),
            base_url: "https://api.carrier.example.com/v1".to_string(),
            timeout_secs: 10,
        }
    }

    #[test]
    fn search_path_normalizes_the_number_type() {
        let client = NumberCarrierClient::from_config(&config()).expect("client builds");
        assert_eq!(
            client.url("/available-numbers/US/toll-free"),
            "https://api.carrier.example.com/v1/available-numbers/US/toll-free"
        );
    }

    #[test]
    fn search_results_decode_with_missing_optional_fields() {
        let wire: SearchResultsWire = serde_json::from_str(
            r#"{"numbers":[{"phoneNumber":"+15125550100","capabilities":["voice","sms"]}]}"#,
        )
        .expect("wire decodes");

        let candidates: Vec<CandidateNumber> =
            wire.numbers.into_iter().map(CandidateWire::into).collect();
        assert_eq!(candidates[0].friendly_name, "+15125550100");
        assert_eq!(candidates[0].capabilities, vec!["voice", "sms"]);
    }

    #[test]
    fn pricing_decodes_the_carrier_price_table() {
        let wire: PricingWire = serde_json::from_str(
            r#"{"phoneNumberPrices":[
                {"numberType":"local","basePrice":"1.15","currentPrice":"1.15","priceUnit":"USD"},
                {"numberType":"toll free","basePrice":"2.00","currentPrice":"2.00","priceUnit":"USD"}
            ]}"#,
        )
        .expect("wire decodes");

        let quotes: Vec<PriceQuote> = wire.phone_number_prices.into_iter().map(Into::into).collect();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[1].number_type, "toll free");
        assert_eq!(quotes[1].current_price, "2.00");
    }

    #[test]
    fn empty_pricing_document_is_an_empty_list() {
        let wire: PricingWire = serde_json::from_str("{}").expect("wire decodes");
        assert!(wire.phone_number_prices.is_empty());
    }
}
