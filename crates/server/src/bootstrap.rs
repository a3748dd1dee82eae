use std::sync::Arc;

use frontdesk_core::config::{AppConfig, ConfigError, LoadOptions};
use frontdesk_core::{Deployer, ProviderError};
use frontdesk_providers::{HostedAssistantClient, NumberCarrierClient};
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub deployer: Arc<Deployer<HostedAssistantClient, NumberCarrierClient>>,
    pub assistant_client: Arc<HostedAssistantClient>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("provider client construction failed: {0}")]
    Client(#[source] ProviderError),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

/// Builds every long-lived collaborator once. Both HTTP clients are
/// constructed here and injected; nothing downstream creates its own.
pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let assistant = HostedAssistantClient::from_config(&config.assistant_provider)
        .map_err(BootstrapError::Client)?;
    let carrier =
        NumberCarrierClient::from_config(&config.carrier).map_err(BootstrapError::Client)?;
    info!(
        event_name = "system.bootstrap.clients_ready",
        correlation_id = "bootstrap",
        assistant_base_url = %config.assistant_provider.base_url,
        carrier_base_url = %config.carrier.base_url,
        "provider clients constructed"
    );

    let assistant_client = Arc::new(assistant.clone());
    let deployer = Arc::new(Deployer::new(assistant, carrier));

    Ok(Application { config, deployer, assistant_client })
}
