use crate::error::ConfigurationError;
use secrecy::{ExposeSecret, Secret};
use std::env;

pub const DEFAULT_DEPLOYMENT: &str = "gpt-5";
pub const DEFAULT_API_VERSION: &str = "2024-12-01-preview";

/// Azure OpenAI connection settings.
#[derive(Clone, Debug)]
pub struct Configuration {
    pub endpoint: String,
    pub api_key: Secret<String>,
    pub deployment_name: String,
    pub api_version: String,
}

impl Configuration {
    /// Reads the settings from the process environment, after loading `.env` if present.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            endpoint: lookup("AZURE_OPENAI_ENDPOINT").unwrap_or_default(),
            api_key: Secret::new(lookup("AZURE_OPENAI_API_KEY").unwrap_or_default()),
            deployment_name: lookup("AZURE_OPENAI_DEPLOYMENT_NAME")
                .unwrap_or_else(|| DEFAULT_DEPLOYMENT.to_string()),
            api_version: lookup("AZURE_OPENAI_API_VERSION")
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
        }
    }

    /// Applies non-empty overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        api_key: Option<String>,
        deployment_name: Option<String>,
        api_version: Option<String>,
    ) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = non_empty(endpoint) {
            self.endpoint = endpoint;
        }
        if let Some(api_key) = non_empty(api_key) {
            self.api_key = Secret::new(api_key);
        }
        if let Some(deployment_name) = non_empty(deployment_name) {
            self.deployment_name = deployment_name;
        }
        if let Some(api_version) = non_empty(api_version) {
            self.api_version = api_version;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.endpoint.trim().is_empty() || self.api_key.expose_secret().trim().is_empty() {
            return Err(ConfigurationError::MissingCredentials);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Configuration::from_lookup(lookup_from(&[
            ("AZURE_OPENAI_ENDPOINT", "https://example.openai.azure.com"),
            ("AZURE_OPENAI_API_KEY", "secret"),
        ]));

        assert_eq!(config.deployment_name, DEFAULT_DEPLOYMENT);
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn explicit_values_win_over_defaults() {
        let config = Configuration::from_lookup(lookup_from(&[
            ("AZURE_OPENAI_DEPLOYMENT_NAME", "gpt-4o"),
            ("AZURE_OPENAI_API_VERSION", "2024-06-01"),
        ]));

        assert_eq!(config.deployment_name, "gpt-4o");
        assert_eq!(config.api_version, "2024-06-01");
    }

    #[test]
    fn missing_key_fails_validation() {
        let config = Configuration::from_lookup(lookup_from(&[(
            "AZURE_OPENAI_ENDPOINT",
            "https://example.openai.azure.com",
        )]));

        assert_eq!(
            config.validate(),
            Err(ConfigurationError::MissingCredentials)
        );
    }

    #[test]
    fn missing_endpoint_fails_validation() {
        let config = Configuration::from_lookup(lookup_from(&[("AZURE_OPENAI_API_KEY", "k")]));

        assert_eq!(
            config.validate(),
            Err(ConfigurationError::MissingCredentials)
        );
    }

    #[test]
    fn empty_overrides_are_ignored() {
        let config = Configuration::from_lookup(lookup_from(&[("AZURE_OPENAI_API_KEY", "env-key")]))
            .with_overrides(
                Some("https://override.openai.azure.com".into()),
                Some("".into()),
                None,
                Some("2025-01-01".into()),
            );

        assert_eq!(config.endpoint, "https://override.openai.azure.com");
        assert_eq!(config.api_key.expose_secret(), "env-key");
        assert_eq!(config.deployment_name, DEFAULT_DEPLOYMENT);
        assert_eq!(config.api_version, "2025-01-01");
    }
}
