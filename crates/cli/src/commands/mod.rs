pub mod analyze;
pub mod config;
pub mod deploy;
pub mod doctor;
pub mod numbers;

use serde::Serialize;

use frontdesk_core::config::{AppConfig, LoadOptions};
use frontdesk_core::{Deployer, ProviderError};
use frontdesk_providers::{HostedAssistantClient, NumberCarrierClient};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Everything a networked command needs, constructed once per invocation.
pub(crate) struct Runtime {
    pub deployer: Deployer<HostedAssistantClient, NumberCarrierClient>,
}

pub(crate) enum RuntimeError {
    Config(String),
    Client(ProviderError),
}

pub(crate) fn build_runtime() -> Result<Runtime, RuntimeError> {
    let config = AppConfig::load(LoadOptions::default())
        .map_err(|error| RuntimeError::Config(error.to_string()))?;

    let assistant = HostedAssistantClient::from_config(&config.assistant_provider)
        .map_err(RuntimeError::Client)?;
    let carrier =
        NumberCarrierClient::from_config(&config.carrier).map_err(RuntimeError::Client)?;

    Ok(Runtime { deployer: Deployer::new(assistant, carrier) })
}

pub(crate) fn block_on<F: std::future::Future>(future: F) -> Result<F::Output, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| format!("failed to initialize async runtime: {error}"))?;
    Ok(runtime.block_on(future))
}
