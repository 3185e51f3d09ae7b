use crate::config::Configuration;
use crate::error::{ConfigurationError, GenerationError};
use crate::llm::{AzureOpenAiClient, ChatMessage, ChatModel};
use crate::models::{DocumentationRecord, DocumentationRequest};
use crate::store::SessionStore;

pub const SYSTEM_PROMPT: &str = "You are an expert API documentation writer. \
Create clear, concise, and professional API documentation.";

/// Sampling temperature for every generation call.
pub const TEMPERATURE: f32 = 1.0;

pub fn build_prompt(request: &DocumentationRequest) -> String {
    format!(
        "Generate professional API documentation for the following endpoint:\n\n\
        API Name: {}\n\
        HTTP Method: {}\n\
        Endpoint: {}\n\
        Description: {}\n\
        Parameters: {}\n\n\
        Please provide:\n\
        1. A clear description of what this API does\n\
        2. Request format and examples\n\
        3. Response format and examples\n\
        4. Possible error codes\n\
        5. Usage notes\n\n\
        Format the output in a clear, professional manner.",
        request.api_name,
        request.method,
        request.endpoint,
        request.description,
        request.parameters
    )
}

pub struct DocGenerator<M> {
    model: M,
}

impl DocGenerator<AzureOpenAiClient> {
    /// Refuses to build a client unless the credentials are present.
    pub fn from_config(config: &Configuration) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self::new(AzureOpenAiClient::new(config)))
    }
}

impl<M: ChatModel> DocGenerator<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Generates documentation for `request` and records it in `store`.
    ///
    /// Exactly one model call is made. Nothing is stored when it fails.
    pub async fn generate(
        &self,
        request: &DocumentationRequest,
        store: &mut SessionStore,
    ) -> Result<String, GenerationError> {
        let prompt = build_prompt(request);
        let messages = [ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)];

        tracing::info!(
            api_name = %request.api_name,
            method = %request.method,
            prompt_len = messages[1].content.len(),
            "Generating documentation"
        );

        let documentation = self.model.complete(&messages, TEMPERATURE).await?;

        let record = DocumentationRecord::from_request(
            request,
            documentation.clone(),
            chrono::Local::now().naive_local(),
        );
        store.append(record);

        Ok(documentation)
    }
}
