#[cfg(feature = "cli")]
pub mod cli;
pub mod registry_file;

use crate::core::parser::OverflowPolicy;
use crate::core::ConfigProvider;
use crate::utils::error::{BirthdayError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_required_field,
    validate_url, Validate,
};
use std::fmt;
use std::time::Duration;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
pub const MODEL_VAR: &str = "BIRTHDAY_MODEL";
pub const TIMEOUT_VAR: &str = "BIRTHDAY_TIMEOUT_SECONDS";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f64,
    pub frequency_penalty: f64,
    pub max_tokens: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            frequency_penalty: 1.5,
            max_tokens: 4096,
        }
    }
}

#[derive(Clone)]
pub struct ServiceConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_seconds: u64,
    pub sampling: SamplingParams,
    pub overflow: OverflowPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            sampling: SamplingParams::default(),
            overflow: OverflowPolicy::default(),
        }
    }
}

// The key must never reach the logs.
impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("sampling", &self.sampling)
            .field("overflow", &self.overflow)
            .finish()
    }
}

impl ServiceConfig {
    /// Reads settings from the process environment. A missing API key is not
    /// an error here; it is rejected when the service is constructed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let timeout_seconds = match non_empty(TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| BirthdayError::InvalidConfigValueError {
                    field: TIMEOUT_VAR.to_string(),
                    value: raw.clone(),
                    reason: "Expected a whole number of seconds".to_string(),
                })?,
            None => DEFAULT_TIMEOUT_SECONDS,
        };

        Ok(Self {
            api_key: non_empty(API_KEY_VAR),
            base_url: non_empty(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: non_empty(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout_seconds,
            sampling: SamplingParams::default(),
            overflow: OverflowPolicy::default(),
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        let api_key = validate_required_field(API_KEY_VAR, &self.api_key)?;
        validate_non_empty_string(API_KEY_VAR, api_key).map_err(|_| {
            BirthdayError::MissingConfigError {
                field: API_KEY_VAR.to_string(),
            }
        })?;

        validate_url("base_url", &self.base_url)?;
        validate_non_empty_string("model", &self.model)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        validate_range("temperature", self.sampling.temperature, 0.0, 2.0)?;
        validate_range(
            "frequency_penalty",
            self.sampling.frequency_penalty,
            -2.0,
            2.0,
        )?;
        validate_positive_number("max_tokens", self.sampling.max_tokens, 1)?;
        Ok(())
    }
}

impl ConfigProvider for ServiceConfig {
    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = ServiceConfig::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.sampling, SamplingParams::default());
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "sk-test"),
            (BASE_URL_VAR, "http://localhost:9000/v1"),
            (MODEL_VAR, "gpt-4o"),
            (TIMEOUT_VAR, "15"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.base_url, "http://localhost:9000/v1");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_key_only_environment_targets_openai_model() {
        let config = ServiceConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "sk-test")])).unwrap();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-4o");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_api_key_is_treated_as_missing() {
        let config = ServiceConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "  ")])).unwrap();
        assert!(config.api_key.is_none());
        let err = config.validate().unwrap_err();
        assert!(matches!(err, BirthdayError::MissingConfigError { .. }));
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let err = ServiceConfig::from_lookup(lookup_from(&[(TIMEOUT_VAR, "soon")])).unwrap_err();
        assert!(matches!(err, BirthdayError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = ServiceConfig::default().with_api_key("sk-test");
        assert!(base.validate().is_ok());

        let mut config = base.clone();
        config.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = base.clone();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = base;
        config.sampling.temperature = 3.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ServiceConfig::default().with_api_key("sk-very-secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
