use serde::Serialize;

use frontdesk_core::config::{AppConfig, LoadOptions};
use frontdesk_core::ListOptions;
use frontdesk_providers::{HostedAssistantClient, NumberCarrierClient};

use super::block_on;
use frontdesk_core::clients::{AssistantProviderClient, CarrierClient};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_assistant_provider(&config));
            checks.push(check_carrier(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(DoctorCheck {
                name: "assistant_provider_reachability",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
            checks.push(DoctorCheck {
                name: "carrier_reachability",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_assistant_provider(config: &AppConfig) -> DoctorCheck {
    let client = match HostedAssistantClient::from_config(&config.assistant_provider) {
        Ok(client) => client,
        Err(error) => {
            return DoctorCheck {
                name: "assistant_provider_reachability",
                status: CheckStatus::Fail,
                details: error.to_string(),
            }
        }
    };

    let outcome = block_on(client.list(ListOptions { limit: Some(1) }));
    match outcome {
        Ok(Ok(_)) => DoctorCheck {
            name: "assistant_provider_reachability",
            status: CheckStatus::Pass,
            details: format!("listed assistants via `{}`", config.assistant_provider.base_url),
        },
        Ok(Err(error)) => DoctorCheck {
            name: "assistant_provider_reachability",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
        Err(message) => DoctorCheck {
            name: "assistant_provider_reachability",
            status: CheckStatus::Fail,
            details: message,
        },
    }
}

fn check_carrier(config: &AppConfig) -> DoctorCheck {
    let client = match NumberCarrierClient::from_config(&config.carrier) {
        Ok(client) => client,
        Err(error) => {
            return DoctorCheck {
                name: "carrier_reachability",
                status: CheckStatus::Fail,
                details: error.to_string(),
            }
        }
    };

    let outcome = block_on(client.get_pricing("US"));
    match outcome {
        Ok(Ok(_)) => DoctorCheck {
            name: "carrier_reachability",
            status: CheckStatus::Pass,
            details: format!("fetched US pricing via `{}`", config.carrier.base_url),
        },
        Ok(Err(error)) => DoctorCheck {
            name: "carrier_reachability",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
        Err(message) => {
            DoctorCheck { name: "carrier_reachability", status: CheckStatus::Fail, details: message }
        }
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
