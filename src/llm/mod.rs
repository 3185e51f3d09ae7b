pub mod azure_client;
pub mod client;

pub use azure_client::AzureOpenAiClient;
pub use client::{ChatMessage, ChatModel};
