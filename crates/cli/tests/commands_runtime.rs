use std::env;
use std::sync::{Mutex, OnceLock};

use frontdesk_cli::commands::{config, deploy, doctor};
use serde_json::Value;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

const VARS: &[&str] = &[
    "FRONTDESK_ASSISTANT_API_KEY",
    "FRONTDESK_CARRIER_ACCOUNT_SID",
    "FRONTDESK_CARRIER_AUTH_TOKEN",
];

fn with_env(vars: &[(&str, &str)], run: impl FnOnce()) {
    let _guard = env_lock().lock().expect("env lock");
    for var in VARS {
        env::remove_var(var);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }
    run();
    for (key, _) in vars {
        env::remove_var(key);
    }
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be JSON")
}

#[test]
fn doctor_fails_config_check_without_credentials() {
    with_env(&[], || {
        let report = doctor::run(true);
        let payload: Value = serde_json::from_str(&report).expect("doctor emits JSON");

        assert_eq!(payload["overall_status"], "fail");
        assert_eq!(payload["checks"][0]["name"], "config_validation");
        assert_eq!(payload["checks"][0]["status"], "fail");
        assert_eq!(payload["checks"][1]["status"], "skipped");
        assert_eq!(payload["checks"][2]["status"], "skipped");
    });
}

#[test]
fn doctor_human_output_lists_every_check() {
    with_env(&[], || {
        let report = doctor::run(false);
        assert!(report.contains("config_validation"));
        assert!(report.contains("assistant_provider_reachability"));
        assert!(report.contains("carrier_reachability"));
    });
}

#[test]
fn config_command_reports_missing_credentials() {
    with_env(&[], || {
        let output = config::run();
        assert!(output.contains("config validation failed"));
        assert!(output.contains("assistant_provider.api_key"));
    });
}

#[test]
fn config_command_redacts_secrets() {
    with_env(
        &[
            ("FRONTDESK_ASSISTANT_API_KEY", "fk-super-secret"),
            ("FRONTDESK_CARRIER_ACCOUNT_SID", "AC-test"),
            ("FRONTDESK_CARRIER_AUTH_TOKEN", "tok-super-secret"),
        ],
        || {
            let output = config::run();
            assert!(!output.contains("fk-super-secret"));
            assert!(!output.contains("tok-super-secret"));
            assert!(output.contains("fk-***"));
            assert!(output.contains("env (FRONTDESK_ASSISTANT_API_KEY)"));
        },
    );
}

#[test]
fn deploy_requires_valid_app_config() {
    with_env(&[], || {
        let result = deploy::run(deploy::DeployArgs {
            business: "does-not-exist.toml".into(),
            country: "US".to_string(),
            number_type: "local".to_string(),
            area_code: None,
            contains: None,
            limit: 5,
            confirm_price: None,
            confirm_token: None,
        });

        assert_eq!(result.exit_code, 2);
        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn deploy_rejects_a_missing_business_file() {
    with_env(
        &[
            ("FRONTDESK_ASSISTANT_API_KEY", "fk-test"),
            ("FRONTDESK_CARRIER_ACCOUNT_SID", "AC-test"),
            ("FRONTDESK_CARRIER_AUTH_TOKEN", "tok-test"),
        ],
        || {
            let result = deploy::run(deploy::DeployArgs {
                business: "does-not-exist.toml".into(),
                country: "US".to_string(),
                number_type: "local".to_string(),
                area_code: None,
                contains: None,
                limit: 5,
                confirm_price: None,
                confirm_token: None,
            });

            assert_eq!(result.exit_code, 2);
            let payload = parse_payload(&result.output);
            assert_eq!(payload["error_class"], "business_config");
            assert!(payload["message"].as_str().unwrap_or("").contains("does-not-exist.toml"));
        },
    );
}
