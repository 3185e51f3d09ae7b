use thiserror::Error;

/// Raised before any model call when the Azure credentials are unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("missing credentials: set AZURE_OPENAI_ENDPOINT and AZURE_OPENAI_API_KEY")]
    MissingCredentials,
}

/// Failure of the single chat-completion exchange.
///
/// The `Display` form is what gets shown to the user, so every variant carries
/// the same "Error generating documentation" prefix.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Error generating documentation: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Error generating documentation: provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Error generating documentation: model returned no content")]
    EmptyResponse,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Please fill in API Name and Endpoint! ({0} is empty)")]
    MissingField(&'static str),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("File {0} not found!")]
    NotFound(String),

    #[error("Error loading file: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Error encoding documentation: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Error accessing file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
