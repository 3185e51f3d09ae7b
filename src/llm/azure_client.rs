use super::client::{ChatMessage, ChatModel};
use crate::config::Configuration;
use crate::error::GenerationError;
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde_json::json;

pub struct AzureOpenAiClient {
    endpoint: String,
    api_key: Secret<String>,
    deployment: String,
    api_version: String,
    client: reqwest::Client,
}

impl AzureOpenAiClient {
    pub fn new(config: &Configuration) -> Self {
        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            deployment: config.deployment_name.clone(),
            api_version: config.api_version.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.endpoint, self.deployment
        )
    }
}

#[async_trait]
impl ChatModel for AzureOpenAiClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, GenerationError> {
        tracing::debug!(
            deployment = %self.deployment,
            messages = messages.len(),
            "Sending chat completion request to Azure OpenAI"
        );

        let response = self
            .client
            .post(self.completions_url())
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", self.api_key.expose_secret().as_str())
            .header("Content-Type", "application/json")
            .json(&json!({
                "messages": messages,
                "temperature": temperature
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status, "Azure OpenAI returned an error");
            return Err(GenerationError::Provider { status, body });
        }

        let response_json: serde_json::Value = response.json().await?;

        let answer = response_json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .trim()
            .to_string();

        if answer.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        Ok(answer)
    }
}
