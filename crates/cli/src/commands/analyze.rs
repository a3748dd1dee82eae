use frontdesk_core::AssistantId;

use super::{block_on, build_runtime, CommandResult, RuntimeError};

pub fn run(assistant_id: &str) -> CommandResult {
    let runtime = match build_runtime() {
        Ok(runtime) => runtime,
        Err(RuntimeError::Config(message)) => {
            return CommandResult::failure("analyze", "config_validation", message, 2)
        }
        Err(RuntimeError::Client(error)) => {
            return CommandResult::failure("analyze", "provider", error.to_string(), 1)
        }
    };

    let id = AssistantId(assistant_id.to_string());
    let outcome = block_on(runtime.deployer.analyze_deployment(&id));

    match outcome {
        Ok(Ok(analysis)) => {
            let summary = serde_json::to_string_pretty(&analysis)
                .unwrap_or_else(|error| format!("analysis fetched, rendering lost: {error}"));
            CommandResult::success("analyze", summary)
        }
        Ok(Err(error)) => {
            let class = if error.is_unavailable() { "provider_unavailable" } else { "provider" };
            CommandResult::failure("analyze", class, error.to_string(), 1)
        }
        Err(message) => CommandResult::failure("analyze", "runtime", message, 1),
    }
}
