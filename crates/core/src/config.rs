use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process-wide configuration. Loaded once at startup; missing provider
/// credentials halt the process there instead of failing per call.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub assistant_provider: AssistantProviderConfig,
    pub carrier: CarrierConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct AssistantProviderConfig {
    pub api_key: SecretString,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct CarrierConfig {
    pub account_sid: String,
    pub auth_token: SecretString,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub graceful_shutdown_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub assistant_api_key: Option<String>,
    pub assistant_base_url: Option<String>,
    pub carrier_account_sid: Option<String>,
    pub carrier_auth_token: Option<String>,
    pub carrier_base_url: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assistant_provider: AssistantProviderConfig {
                api_key: String::new().into(),
                base_url: "https://api.assistant.example.com/v1".to_string(),
                timeout_secs: 30,
            },
            carrier: CarrierConfig {
                account_sid: String::new(),
                auth_token: String::new().into(),
                base_url: "https://api.carrier.example.com/v1".to_string(),
                timeout_secs: 30,
            },
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 8080,
                graceful_shutdown_secs: 15,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("frontdesk.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(assistant) = patch.assistant_provider {
            if let Some(api_key_value) = assistant.api_key {
                self.assistant_provider.api_key = api_key_value.into();
            }
            if let Some(base_url) = assistant.base_url {
                self.assistant_provider.base_url = base_url;
            }
            if let Some(timeout_secs) = assistant.timeout_secs {
                self.assistant_provider.timeout_secs = timeout_secs;
            }
        }

        if let Some(carrier) = patch.carrier {
            if let Some(account_sid) = carrier.account_sid {
                self.carrier.account_sid = account_sid;
            }
            if let Some(auth_token_value) = carrier.auth_token {
                self.carrier.auth_token = auth_token_value.into();
            }
            if let Some(base_url) = carrier.base_url {
                self.carrier.base_url = base_url;
            }
            if let Some(timeout_secs) = carrier.timeout_secs {
                self.carrier.timeout_secs = timeout_secs;
            }
        }

        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
            if let Some(graceful_shutdown_secs) = server.graceful_shutdown_secs {
                self.server.graceful_shutdown_secs = graceful_shutdown_secs;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("FRONTDESK_ASSISTANT_API_KEY") {
            self.assistant_provider.api_key = value.into();
        }
        if let Some(value) = read_env("FRONTDESK_ASSISTANT_BASE_URL") {
            self.assistant_provider.base_url = value;
        }
        if let Some(value) = read_env("FRONTDESK_ASSISTANT_TIMEOUT_SECS") {
            self.assistant_provider.timeout_secs =
                parse_u64("FRONTDESK_ASSISTANT_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("FRONTDESK_CARRIER_ACCOUNT_SID") {
            self.carrier.account_sid = value;
        }
        if let Some(value) = read_env("FRONTDESK_CARRIER_AUTH_TOKEN") {
            self.carrier.auth_token = value.into();
        }
        if let Some(value) = read_env("FRONTDESK_CARRIER_BASE_URL") {
            self.carrier.base_url = value;
        }
        if let Some(value) = read_env("FRONTDESK_CARRIER_TIMEOUT_SECS") {
            self.carrier.timeout_secs = parse_u64("FRONTDESK_CARRIER_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("FRONTDESK_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("FRONTDESK_SERVER_PORT") {
            self.server.port = parse_u16("FRONTDESK_SERVER_PORT", &value)?;
        }
        if let Some(value) = read_env("FRONTDESK_SERVER_GRACEFUL_SHUTDOWN_SECS") {
            self.server.graceful_shutdown_secs =
                parse_u64("FRONTDESK_SERVER_GRACEFUL_SHUTDOWN_SECS", &value)?;
        }

        let log_level =
            read_env("FRONTDESK_LOGGING_LEVEL").or_else(|| read_env("FRONTDESK_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("FRONTDESK_LOGGING_FORMAT").or_else(|| read_env("FRONTDESK_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(assistant_api_key) = overrides.assistant_api_key {
            self.assistant_provider.api_key = assistant_api_key.into();
        }
        if let Some(assistant_base_url) = overrides.assistant_base_url {
            self.assistant_provider.base_url = assistant_base_url;
        }
        if let Some(carrier_account_sid) = overrides.carrier_account_sid {
            self.carrier.account_sid = carrier_account_sid;
        }
        if let Some(carrier_auth_token) = overrides.carrier_auth_token {
            self.carrier.auth_token = carrier_auth_token.into();
        }
        if let Some(carrier_base_url) = overrides.carrier_base_url {
            self.carrier.base_url = carrier_base_url;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_assistant_provider(&self.assistant_provider)?;
        validate_carrier(&self.carrier)?;
        validate_server(&self.server)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("frontdesk.toml"), PathBuf::from("config/frontdesk.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_assistant_provider(provider: &AssistantProviderConfig) -> Result<(), ConfigError> {
    if provider.api_key.expose_secret().trim().is_empty() {
        return Err(ConfigError::Validation(
            "assistant_provider.api_key is required. Generate one in your provider dashboard \
             under API Keys."
                .to_string(),
        ));
    }

    if !is_http_url(&provider.base_url) {
        return Err(ConfigError::Validation(
            "assistant_provider.base_url must start with http:// or https://".to_string(),
        ));
    }

    if provider.timeout_secs == 0 || provider.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "assistant_provider.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_carrier(carrier: &CarrierConfig) -> Result<(), ConfigError> {
    if carrier.account_sid.trim().is_empty() {
        return Err(ConfigError::Validation(
            "carrier.account_sid is required. Find it on your carrier console's account page."
                .to_string(),
        ));
    }

    if carrier.auth_token.expose_secret().trim().is_empty() {
        return Err(ConfigError::Validation(
            "carrier.auth_token is required. Find it next to the account SID on your carrier \
             console."
                .to_string(),
        ));
    }

    if !is_http_url(&carrier.base_url) {
        return Err(ConfigError::Validation(
            "carrier.base_url must start with http:// or https://".to_string(),
        ));
    }

    if carrier.timeout_secs == 0 || carrier.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "carrier.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.port == 0 {
        return Err(ConfigError::Validation("server.port must be greater than zero".to_string()));
    }

    if server.graceful_shutdown_secs == 0 {
        return Err(ConfigError::Validation(
            "server.graceful_shutdown_secs must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    assistant_provider: Option<AssistantProviderPatch>,
    carrier: Option<CarrierPatch>,
    server: Option<ServerPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct AssistantProviderPatch {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct CarrierPatch {
    account_sid: Option<String>,
    auth_token: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
    graceful_shutdown_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::sync::{Mutex, OnceLock};

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    const CREDENTIAL_VARS: &[&str] = &[
        "FRONTDESK_ASSISTANT_API_KEY",
        "FRONTDESK_CARRIER_ACCOUNT_SID",
        "FRONTDESK_CARRIER_AUTH_TOKEN",
    ];

    fn set_credentials() {
        env::set_var("FRONTDESK_ASSISTANT_API_KEY", "fk-test");
        env::set_var("FRONTDESK_CARRIER_ACCOUNT_SID", "AC-test");
        env::set_var("FRONTDESK_CARRIER_AUTH_TOKEN", "token-test");
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_ASSISTANT_KEY", "fk-from-env");
        env::set_var("FRONTDESK_CARRIER_ACCOUNT_SID", "AC-test");
        env::set_var("FRONTDESK_CARRIER_AUTH_TOKEN", "token-test");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("frontdesk.toml");
            fs::write(
                &path,
                r#"
[assistant_provider]
api_key = "${TEST_ASSISTANT_KEY}"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.assistant_provider.api_key.expose_secret() == "fk-from-env",
                "api key should be interpolated from the environment",
            )
        })();

        clear_vars(&[
            "TEST_ASSISTANT_KEY",
            "FRONTDESK_CARRIER_ACCOUNT_SID",
            "FRONTDESK_CARRIER_AUTH_TOKEN",
        ]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        set_credentials();
        env::set_var("FRONTDESK_CARRIER_BASE_URL", "https://env.carrier.example.com");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("frontdesk.toml");
            fs::write(
                &path,
                r#"
[carrier]
base_url = "https://file.carrier.example.com"

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.carrier.base_url == "https://env.carrier.example.com",
                "env carrier url should win over file and default",
            )?;
            ensure(config.logging.level == "debug", "override log level should win over file")
        })();

        clear_vars(CREDENTIAL_VARS);
        clear_vars(&["FRONTDESK_CARRIER_BASE_URL"]);
        result
    }

    #[test]
    fn missing_credentials_fail_validation_with_actionable_message() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        clear_vars(CREDENTIAL_VARS);

        let error = match AppConfig::load(LoadOptions::default()) {
            Ok(_) => return Err("expected validation failure without credentials".to_string()),
            Err(error) => error,
        };

        ensure(
            matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("assistant_provider.api_key")
            ),
            "validation failure should name the missing key",
        )
    }

    #[test]
    fn secrets_are_not_leaked_by_debug() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("FRONTDESK_ASSISTANT_API_KEY", "fk-secret-value");
        env::set_var("FRONTDESK_CARRIER_ACCOUNT_SID", "AC-test");
        env::set_var("FRONTDESK_CARRIER_AUTH_TOKEN", "carrier-secret-value");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;
            let debug = format!("{config:?}");

            ensure(!debug.contains("fk-secret-value"), "debug output must not contain api key")?;
            ensure(
                !debug.contains("carrier-secret-value"),
                "debug output must not contain auth token",
            )?;
            ensure(
                matches!(config.logging.format, LogFormat::Compact),
                "default logging format should be compact",
            )
        })();

        clear_vars(CREDENTIAL_VARS);
        result
    }

    #[test]
    fn invalid_numeric_env_override_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        set_credentials();
        env::set_var("FRONTDESK_SERVER_PORT", "not-a-port");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => return Err("expected invalid override failure".to_string()),
                Err(error) => error,
            };
            ensure(
                matches!(error, ConfigError::InvalidEnvOverride { ref key, .. } if key == "FRONTDESK_SERVER_PORT"),
                "error should name the offending env var",
            )
        })();

        clear_vars(CREDENTIAL_VARS);
        clear_vars(&["FRONTDESK_SERVER_PORT"]);
        result
    }
}
