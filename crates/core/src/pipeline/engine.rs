//! The deployment orchestrator: one linear pipeline per run.
//!
//! Sequencing is the contract here. The assistant is created before any
//! number is requested, so a failed creation can never charge for telephony;
//! the purchased number always carries the already-issued assistant id. No
//! compensating actions: a failure after creation surfaces the orphaned
//! assistant id instead of guessing at cleanup.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analytics::{AnalyticsSnapshot, DeploymentAnalysis};
use crate::builder::AssistantConfigBuilder;
use crate::clients::{AssistantPatch, AssistantProviderClient, CarrierClient, ProviderError};
use crate::costs::CostEstimator;
use crate::domain::business::BusinessConfig;
use crate::domain::deployment::{
    DeployedAssistant, DeployedNumber, DeploymentId, DeploymentResult,
};
use crate::domain::number::{AssistantId, NumberSearchCriteria};
use crate::errors::{DeployError, PipelineFailure};
use crate::guide;
use crate::pipeline::states::{DeployState, DeployStep};
use crate::pricing::match_price;
use crate::provisioner::{PhoneNumberProvisioner, PurchaseConfirmation, PurchaseError};
use crate::templates::TemplateResolver;

/// The number the caller wants attached to the deployment, plus the typed
/// purchase confirmation gathered up front.
#[derive(Clone, Debug)]
pub struct NumberOrder {
    pub criteria: NumberSearchCriteria,
    pub confirmation: PurchaseConfirmation,
}

pub struct Deployer<A, C> {
    assistant_provider: A,
    provisioner: PhoneNumberProvisioner<C, A>,
    resolver: TemplateResolver,
    builder: AssistantConfigBuilder,
    estimator: CostEstimator,
}

impl<A, C> Deployer<A, C>
where
    A: AssistantProviderClient + Clone,
    C: CarrierClient,
{
    pub fn new(assistant_provider: A, carrier: C) -> Self {
        let provisioner = PhoneNumberProvisioner::new(carrier, assistant_provider.clone());
        Self {
            assistant_provider,
            provisioner,
            resolver: TemplateResolver::new(),
            builder: AssistantConfigBuilder::new(),
            estimator: CostEstimator::new(),
        }
    }
}

impl<A, C> Deployer<A, C>
where
    A: AssistantProviderClient,
    C: CarrierClient,
{
    pub fn provisioner(&self) -> &PhoneNumberProvisioner<C, A> {
        &self.provisioner
    }

    /// Runs the full pipeline. Synchronous from the caller's point of view;
    /// several provider round trips happen inside.
    pub async fn deploy_business_assistant(
        &self,
        config: BusinessConfig,
        order: NumberOrder,
    ) -> Result<DeploymentResult, DeployError> {
        let deployment_id = DeploymentId(format!("dep_{}", Uuid::new_v4().simple()));
        let mut state = DeployState::BuildingConfig;

        // BuildingConfig: pure data transform.
        let strategy = self.resolver.resolve(&config.industry, config.subtype.as_deref());
        let payload = self.builder.build(&config, strategy.as_ref())?;
        state = self.advance(&deployment_id, state);

        // CreatingAssistant: first provider call. Fail-fast — on error no
        // phone number is ever requested.
        let assistant = match self.assistant_provider.create(&payload).await {
            Ok(assistant) => assistant,
            Err(source) => {
                return Err(self.abort(&deployment_id, DeployStep::CreateAssistant, None, source))
            }
        };
        info!(
            event_name = "deploy.assistant_created",
            deployment_id = %deployment_id,
            assistant_id = %assistant.id,
            "assistant created"
        );
        state = self.advance(&deployment_id, state);

        // ProvisioningNumber: search, price, guarded purchase — with the
        // fresh assistant id attached to the purchase.
        let candidates = match self.provisioner.search(&order.criteria).await {
            Ok(candidates) => candidates,
            Err(source) => {
                return Err(self.abort(
                    &deployment_id,
                    DeployStep::ProvisionNumber,
                    Some(assistant.id.clone()),
                    source,
                ))
            }
        };
        let Some(candidate) = candidates.first() else {
            warn!(
                event_name = "deploy.no_numbers",
                deployment_id = %deployment_id,
                country = %order.criteria.country,
                number_type = %order.criteria.number_type,
                "inventory search returned no candidates"
            );
            return Err(DeployError::NoNumbersAvailable {
                country: order.criteria.country.clone(),
                number_type: order.criteria.number_type.clone(),
                assistant_id: Some(assistant.id),
            });
        };

        let quotes = match self.provisioner.get_pricing(&order.criteria.country).await {
            Ok(quotes) => quotes,
            Err(source) => {
                return Err(self.abort(
                    &deployment_id,
                    DeployStep::ProvisionNumber,
                    Some(assistant.id.clone()),
                    source,
                ))
            }
        };
        let quote = match match_price(&quotes, &order.criteria.number_type) {
            Ok(quote) => quote,
            Err(mismatch) => {
                return Err(DeployError::Pricing {
                    mismatch,
                    assistant_id: Some(assistant.id),
                })
            }
        };

        let record = match self
            .provisioner
            .purchase(candidate, &quote, &order.confirmation, Some(&assistant.id))
            .await
        {
            Ok(record) => record,
            Err(PurchaseError::NotConfirmed(failure)) => {
                info!(
                    event_name = "deploy.purchase_declined",
                    deployment_id = %deployment_id,
                    assistant_id = %assistant.id,
                    "purchase confirmation declined, nothing charged"
                );
                return Err(DeployError::PurchaseNotConfirmed {
                    failure,
                    assistant_id: Some(assistant.id),
                });
            }
            Err(purchase_error) => {
                return Err(DeployError::Aborted {
                    step: DeployStep::ProvisionNumber,
                    assistant_id: Some(assistant.id),
                    source: PipelineFailure::Purchase(purchase_error),
                })
            }
        };
        state = self.advance(&deployment_id, state);

        // Linking: a no-op when the purchase already attached the assistant
        // id, the idempotent patch otherwise.
        if record.assistant_id.is_none() {
            let patch =
                AssistantPatch { phone_number_id: Some(record.id.clone()), first_message: None };
            if let Err(source) = self.assistant_provider.update(&assistant.id, &patch).await {
                return Err(self.abort(
                    &deployment_id,
                    DeployStep::Link,
                    Some(assistant.id),
                    source,
                ));
            }
        }
        state = self.advance(&deployment_id, state);

        // Estimating: pure, cannot fail.
        let estimated_costs = self.estimator.estimate(&config);
        let quick_start_guide = guide::quick_start_guide(&config, &record);
        state = self.advance(&deployment_id, state);
        debug_assert!(state.is_terminal());

        info!(
            event_name = "deploy.done",
            deployment_id = %deployment_id,
            assistant_id = %assistant.id,
            number = %record.number,
            monthly_estimate = estimated_costs.monthly,
            "deployment complete"
        );

        Ok(DeploymentResult {
            id: deployment_id,
            assistant: DeployedAssistant {
                id: assistant.id,
                name: assistant.name,
                phone_number: record.number.clone(),
            },
            phone_number: DeployedNumber { id: record.id, number: record.number },
            analytics: AnalyticsSnapshot::default(),
            quick_start_guide,
            estimated_costs,
            created_at: Utc::now(),
        })
    }

    /// Read-only companion. Deployments are not persisted, so the assistant
    /// id is the durable handle; the provider lookup confirms it still
    /// exists before the placeholder analysis is returned.
    pub async fn analyze_deployment(
        &self,
        assistant_id: &AssistantId,
    ) -> Result<DeploymentAnalysis, ProviderError> {
        let _assistant = self.assistant_provider.get(assistant_id).await?;
        Ok(DeploymentAnalysis::placeholder())
    }

    fn advance(&self, deployment_id: &DeploymentId, state: DeployState) -> DeployState {
        let Some(next) = state.next() else {
            return state;
        };
        info!(
            event_name = "deploy.transition",
            deployment_id = %deployment_id,
            from = ?state,
            to = ?next,
            "pipeline advanced"
        );
        next
    }

    fn abort(
        &self,
        deployment_id: &DeploymentId,
        step: DeployStep,
        assistant_id: Option<AssistantId>,
        source: ProviderError,
    ) -> DeployError {
        warn!(
            event_name = "deploy.aborted",
            deployment_id = %deployment_id,
            step = %step,
            error = %source,
            "pipeline aborted"
        );
        DeployError::Aborted { step, assistant_id, source: PipelineFailure::Provider(source) }
    }
}
