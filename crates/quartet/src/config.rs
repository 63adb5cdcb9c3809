//! Layered settings: built-in defaults, then an optional `quartet.toml`,
//! then `QUARTET_*` environment variables (`QUARTET_PROVIDER__TYPE=openai`).
//!
//! Vendor keys are also read from their conventional variables
//! (`GEMINI_API_KEY`, `GOOGLE_API_KEY`, `OPENAI_API_KEY`). Without any key the
//! provider degrades to offline demo mode instead of failing.
use std::env;
use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::providers::{
    configs::{GeminiProviderConfig, OpenAiProviderConfig, ProviderConfig, RequestPolicy},
    factory::ProviderType,
    gemini, openai,
};

pub const ENV_PREFIX: &str = "QUARTET";
pub const DEFAULT_CONFIG_FILE: &str = "quartet";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {env_var}")]
    MissingEnvVar { env_var: String },

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

/// Map a settings path such as `provider.type` to its environment variable
pub fn to_env_var(field: &str) -> String {
    format!("{}_{}", ENV_PREFIX, field.replace('.', "__").to_uppercase())
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
        }
    }
}

impl HttpSettings {
    pub fn policy(&self) -> RequestPolicy {
        RequestPolicy {
            timeout: Duration::from_secs(self.timeout_seconds),
            max_retries: self.max_retries,
            ..RequestPolicy::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum ProviderSettings {
    Gemini {
        #[serde(default = "default_gemini_host")]
        host: String,
        #[serde(default)]
        api_key: Option<String>,
        #[serde(default = "default_gemini_model")]
        model: String,
        #[serde(default)]
        temperature: Option<f32>,
        #[serde(default)]
        max_tokens: Option<i32>,
    },
    OpenAi {
        #[serde(default = "default_openai_host")]
        host: String,
        #[serde(default)]
        api_key: Option<String>,
        #[serde(default = "default_openai_model")]
        model: String,
        #[serde(default)]
        temperature: Option<f32>,
        #[serde(default)]
        max_tokens: Option<i32>,
    },
    Offline,
}

impl ProviderSettings {
    pub fn provider_type(&self) -> ProviderType {
        match self {
            ProviderSettings::Gemini { .. } => ProviderType::Gemini,
            ProviderSettings::OpenAi { .. } => ProviderType::OpenAi,
            ProviderSettings::Offline => ProviderType::Offline,
        }
    }

    /// Resolve into a concrete provider config, falling back to offline mode
    /// when no API key can be found.
    pub fn into_config(self, http: &HttpSettings) -> ProviderConfig {
        match self {
            ProviderSettings::Gemini {
                host,
                api_key,
                model,
                temperature,
                max_tokens,
            } => match api_key.or_else(|| vendor_key(&["GEMINI_API_KEY", "GOOGLE_API_KEY"])) {
                Some(api_key) => ProviderConfig::Gemini(GeminiProviderConfig {
                    host,
                    api_key,
                    model,
                    temperature,
                    max_tokens,
                    policy: http.policy(),
                }),
                None => {
                    tracing::warn!("no Gemini API key configured, running in offline demo mode");
                    ProviderConfig::Offline
                }
            },
            ProviderSettings::OpenAi {
                host,
                api_key,
                model,
                temperature,
                max_tokens,
            } => match api_key.or_else(|| vendor_key(&["OPENAI_API_KEY"])) {
                Some(api_key) => ProviderConfig::OpenAi(OpenAiProviderConfig {
                    host,
                    api_key,
                    model,
                    temperature,
                    max_tokens,
                    policy: http.policy(),
                }),
                None => {
                    tracing::warn!("no OpenAI API key configured, running in offline demo mode");
                    ProviderConfig::Offline
                }
            },
            ProviderSettings::Offline => ProviderConfig::Offline,
        }
    }
}

fn vendor_key(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

/// Command-line overrides, applied above every other source
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub provider: Option<ProviderType>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub provider: ProviderSettings,
    #[serde(default)]
    pub http: HttpSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(None, &Overrides::default())
    }

    /// Load settings from an explicit file (required) or `./quartet.toml` (optional)
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let builder = Config::builder().set_default("provider.type", "gemini")?;

        let builder = match file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("provider.type", overrides.provider.map(|p| p.to_string()))?
            .set_override_option("provider.model", overrides.model.clone())?
            .build()?;

        let result: Result<Self, config::ConfigError> = config.try_deserialize();

        match result {
            Ok(settings) => Ok(settings),
            Err(err) => {
                tracing::debug!("Configuration error: {:?}", &err);

                let error_str = err.to_string();
                if error_str.starts_with("missing field") {
                    let field = error_str
                        .trim_start_matches("missing field `")
                        .trim_end_matches('`');
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else if let config::ConfigError::NotFound(field) = &err {
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else {
                    Err(ConfigError::Other(err))
                }
            }
        }
    }

    pub fn provider_config(self) -> ProviderConfig {
        self.provider.into_config(&self.http)
    }
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_gemini_host() -> String {
    gemini::GEMINI_HOST.to_string()
}

fn default_gemini_model() -> String {
    gemini::GEMINI_MODEL.to_string()
}

fn default_openai_host() -> String {
    openai::OPENAI_HOST.to_string()
}

fn default_openai_model() -> String {
    openai::OPENAI_MODEL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    fn clean_env() {
        for (key, _) in env::vars() {
            if key.starts_with("QUARTET_") {
                env::remove_var(&key);
            }
        }
        for key in ["GEMINI_API_KEY", "GOOGLE_API_KEY", "OPENAI_API_KEY"] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_default_settings() {
        clean_env();

        let settings = Settings::new().unwrap();
        assert_eq!(settings.http, HttpSettings::default());
        assert_eq!(settings.http.timeout_seconds, 30);
        assert_eq!(settings.http.max_retries, 3);

        if let ProviderSettings::Gemini {
            host,
            api_key,
            model,
            temperature,
            max_tokens,
        } = &settings.provider
        {
            assert_eq!(host, "https://generativelanguage.googleapis.com");
            assert_eq!(api_key, &None);
            assert_eq!(model, "gemini-1.5-flash");
            assert_eq!(temperature, &None);
            assert_eq!(max_tokens, &None);
        } else {
            panic!("Expected Gemini provider");
        }

        // no key anywhere means demo mode
        assert!(matches!(settings.provider_config(), ProviderConfig::Offline));
    }

    #[test]
    #[serial]
    fn test_openai_settings_from_env() {
        clean_env();
        env::set_var("QUARTET_PROVIDER__TYPE", "openai");
        env::set_var("QUARTET_PROVIDER__MODEL", "gpt-4o-mini");
        env::set_var("QUARTET_PROVIDER__TEMPERATURE", "0.5");
        env::set_var("QUARTET_PROVIDER__MAX_TOKENS", "800");
        env::set_var("QUARTET_HTTP__TIMEOUT_SECONDS", "12");
        env::set_var("OPENAI_API_KEY", "sk-test");

        let settings = Settings::new().unwrap();
        assert_eq!(settings.provider.provider_type(), ProviderType::OpenAi);
        assert_eq!(settings.http.timeout_seconds, 12);

        match settings.provider_config() {
            ProviderConfig::OpenAi(config) => {
                assert_eq!(config.host, "https://api.openai.com");
                assert_eq!(config.api_key, "sk-test");
                assert_eq!(config.model, "gpt-4o-mini");
                assert_eq!(config.temperature, Some(0.5));
                assert_eq!(config.max_tokens, Some(800));
                assert_eq!(config.policy.timeout, Duration::from_secs(12));
                assert_eq!(config.policy.max_retries, 3);
            }
            other => panic!("Expected OpenAI config, got {other:?}"),
        }

        clean_env();
    }

    #[test]
    #[serial]
    fn test_google_api_key_fallback() {
        clean_env();
        env::set_var("GOOGLE_API_KEY", "google-key");

        match Settings::new().unwrap().provider_config() {
            ProviderConfig::Gemini(config) => assert_eq!(config.api_key, "google-key"),
            other => panic!("Expected Gemini config, got {other:?}"),
        }

        clean_env();
    }

    #[test]
    #[serial]
    fn test_file_then_env_layering() {
        clean_env();
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("quartet.toml");
        fs::write(
            &file_path,
            r#"
[provider]
type = "openai"
api_key = "file-key"
model = "gpt-4o"

[http]
max_retries = 5
"#,
        )
        .unwrap();
        env::set_var("QUARTET_PROVIDER__MODEL", "gpt-4o-mini");

        let settings = Settings::load(Some(file_path.as_path()), &Overrides::default()).unwrap();
        assert_eq!(settings.http.max_retries, 5);
        assert_eq!(settings.http.timeout_seconds, 30);
        match settings.provider {
            ProviderSettings::OpenAi { api_key, model, .. } => {
                assert_eq!(api_key.as_deref(), Some("file-key"));
                assert_eq!(model, "gpt-4o-mini");
            }
            other => panic!("Expected OpenAI provider, got {other:?}"),
        }

        clean_env();
    }

    #[test]
    #[serial]
    fn test_overrides_win() {
        clean_env();
        env::set_var("QUARTET_PROVIDER__TYPE", "openai");

        let overrides = Overrides {
            provider: Some(ProviderType::Offline),
            model: None,
        };
        let settings = Settings::load(None, &overrides).unwrap();
        assert_eq!(settings.provider, ProviderSettings::Offline);

        clean_env();
    }

    #[test]
    #[serial]
    fn test_unknown_provider_type_is_error() {
        clean_env();
        env::set_var("QUARTET_PROVIDER__TYPE", "anthropic");

        assert!(Settings::new().is_err());

        clean_env();
    }

    #[test]
    fn test_to_env_var() {
        assert_eq!(to_env_var("provider.api_key"), "QUARTET_PROVIDER__API_KEY");
        assert_eq!(to_env_var("type"), "QUARTET_TYPE");
    }
}
