//! Thin HTTP surface over the deployment core. Handlers translate JSON in,
//! call the one orchestration entry point (or the provisioner's read-only
//! lookups), and map core errors onto status codes. No provider payloads are
//! built here.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use frontdesk_core::{
    AssistantId, AssistantProviderClient, BusinessConfig, CandidateNumber, CarrierClient,
    DeployError, Deployer, DeploymentAnalysis, DeploymentResult, NumberOrder,
    NumberSearchCriteria, PriceQuote, ProviderError, PurchaseConfirmation,
};

type AppState<A, C> = Arc<Deployer<A, C>>;

pub fn router<A, C>(deployer: Arc<Deployer<A, C>>) -> Router
where
    A: AssistantProviderClient + 'static,
    C: CarrierClient + 'static,
{
    Router::new()
        .route("/api/v1/deployments", post(create_deployment::<A, C>))
        .route("/api/v1/deployments/{assistant_id}/analysis", get(deployment_analysis::<A, C>))
        .route("/api/v1/numbers/search", get(search_numbers::<A, C>))
        .route("/api/v1/numbers/pricing/{country}", get(number_pricing::<A, C>))
        .with_state(deployer)
}

#[derive(Debug, Deserialize)]
pub struct DeployRequest {
    pub business: BusinessConfig,
    pub number: NumberRequest,
}

#[derive(Debug, Deserialize)]
pub struct NumberRequest {
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_number_type")]
    pub number_type: String,
    #[serde(default)]
    pub area_code: Option<String>,
    #[serde(default)]
    pub contains: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    pub confirmation: ConfirmationRequest,
}

/// Typed confirmation forwarded verbatim to the purchase guard.
#[derive(Debug, Deserialize)]
pub struct ConfirmationRequest {
    pub price: String,
    pub token: String,
}

fn default_country() -> String {
    "US".to_string()
}

fn default_number_type() -> String {
    "local".to_string()
}

fn default_limit() -> u32 {
    5
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub error_class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orphaned_assistant_id: Option<String>,
}

async fn create_deployment<A, C>(
    State(deployer): State<AppState<A, C>>,
    Json(request): Json<DeployRequest>,
) -> Result<(StatusCode, Json<DeploymentResult>), (StatusCode, Json<ErrorBody>)>
where
    A: AssistantProviderClient,
    C: CarrierClient,
{
    info!(
        event_name = "api.deployment_requested",
        business = %request.business.business_name,
        industry = %request.business.industry,
        "deployment requested"
    );

    let order = NumberOrder {
        criteria: NumberSearchCriteria {
            country: request.number.country,
            number_type: request.number.number_type,
            area_code: request.number.area_code,
            contains: request.number.contains,
            limit: request.number.limit,
        },
        confirmation: PurchaseConfirmation {
            price: request.number.confirmation.price,
            token: request.number.confirmation.token,
        },
    };

    match deployer.deploy_business_assistant(request.business, order).await {
        Ok(result) => Ok((StatusCode::CREATED, Json(result))),
        Err(error) => Err(deploy_error_response(error)),
    }
}

async fn deployment_analysis<A, C>(
    State(deployer): State<AppState<A, C>>,
    Path(assistant_id): Path<String>,
) -> Result<Json<DeploymentAnalysis>, (StatusCode, Json<ErrorBody>)>
where
    A: AssistantProviderClient,
    C: CarrierClient,
{
    deployer
        .analyze_deployment(&AssistantId(assistant_id))
        .await
        .map(Json)
        .map_err(provider_error_response)
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(rename = "type", default = "default_number_type")]
    pub number_type: String,
    #[serde(default)]
    pub area_code: Option<String>,
    #[serde(default)]
    pub contains: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

async fn search_numbers<A, C>(
    State(deployer): State<AppState<A, C>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<CandidateNumber>>, (StatusCode, Json<ErrorBody>)>
where
    A: AssistantProviderClient,
    C: CarrierClient,
{
    let criteria = NumberSearchCriteria {
        country: query.country,
        number_type: query.number_type,
        area_code: query.area_code,
        contains: query.contains,
        limit: query.limit,
    };

    deployer
        .provisioner()
        .search(&criteria)
        .await
        .map(Json)
        .map_err(provider_error_response)
}

async fn number_pricing<A, C>(
    State(deployer): State<AppState<A, C>>,
    Path(country): Path<String>,
) -> Result<Json<Vec<PriceQuote>>, (StatusCode, Json<ErrorBody>)>
where
    A: AssistantProviderClient,
    C: CarrierClient,
{
    deployer
        .provisioner()
        .get_pricing(&country)
        .await
        .map(Json)
        .map_err(provider_error_response)
}

fn deploy_error_response(error: DeployError) -> (StatusCode, Json<ErrorBody>) {
    let orphaned_assistant_id = error.orphaned_assistant().map(|id| id.0.clone());

    let (status, error_class, available_types) = match &error {
        DeployError::Config(_) => (StatusCode::BAD_REQUEST, "business_config", None),
        DeployError::Pricing { mismatch, .. } => {
            (StatusCode::CONFLICT, "pricing_mismatch", Some(mismatch.available.clone()))
        }
        DeployError::PurchaseNotConfirmed { .. } => {
            (StatusCode::PRECONDITION_FAILED, "purchase_declined", None)
        }
        DeployError::NoNumbersAvailable { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "no_numbers", None)
        }
        DeployError::Aborted { source, .. } => {
            let unavailable = matches!(
                source,
                frontdesk_core::PipelineFailure::Provider(provider)
                    if provider.is_unavailable()
            );
            if unavailable {
                (StatusCode::SERVICE_UNAVAILABLE, "provider_unavailable", None)
            } else {
                (StatusCode::BAD_GATEWAY, "aborted", None)
            }
        }
    };

    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
            error_class: error_class.to_string(),
            available_types,
            orphaned_assistant_id,
        }),
    )
}

fn provider_error_response(error: ProviderError) -> (StatusCode, Json<ErrorBody>) {
    let (status, error_class) = if error.is_unavailable() {
        (StatusCode::SERVICE_UNAVAILABLE, "provider_unavailable")
    } else {
        (StatusCode::BAD_GATEWAY, "provider")
    };

    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
            error_class: error_class.to_string(),
            available_types: None,
            orphaned_assistant_id: None,
        }),
    )
}

#[cfg(test)]
mod tests {
    use frontdesk_core::pricing::PricingMismatch;
    use frontdesk_core::{DeployError, ProviderError};

    use axum::http::StatusCode;

    use super::{deploy_error_response, provider_error_response};

    #[test]
    fn pricing_mismatch_maps_to_conflict_with_available_types() {
        let (status, body) = deploy_error_response(DeployError::Pricing {
            mismatch: PricingMismatch {
                requested: "mobile".to_string(),
                available: vec!["local".to_string(), "toll free".to_string()],
            },
            assistant_id: None,
        });

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.error_class, "pricing_mismatch");
        assert_eq!(
            body.available_types.as_deref(),
            Some(["local".to_string(), "toll free".to_string()].as_slice())
        );
    }

    #[test]
    fn declined_purchase_maps_to_precondition_failed() {
        let (status, body) = deploy_error_response(DeployError::PurchaseNotConfirmed {
            failure: frontdesk_core::ConfirmationFailure::TokenMismatch,
            assistant_id: Some(frontdesk_core::AssistantId("asst_5".to_string())),
        });

        assert_eq!(status, StatusCode::PRECONDITION_FAILED);
        assert_eq!(body.orphaned_assistant_id.as_deref(), Some("asst_5"));
    }

    #[test]
    fn provider_outage_maps_to_service_unavailable() {
        let (status, body) = provider_error_response(ProviderError::Unavailable {
            message: "upstream outage".to_string(),
        });

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.error_class, "provider_unavailable");
        assert!(body.error.contains("retry"));
    }

    #[test]
    fn other_provider_failures_map_to_bad_gateway() {
        let (status, body) = provider_error_response(ProviderError::Rejected {
            status: 418,
            message: "teapot".to_string(),
        });

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.error_class, "provider");
    }
}
