mod anthropic;
mod factory;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use open_ai::OpenAIProvider;
pub use prompt::{wants_pantry, ChatRequest, EMPTY_PANTRY_MESSAGE, RECIPE_SUGGESTION_PROMPT};

use async_trait::async_trait;

use crate::error::FinderError;

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Ask the model for a recipe suggestion
    async fn suggest(&self, request: &ChatRequest) -> Result<String, FinderError>;
}
