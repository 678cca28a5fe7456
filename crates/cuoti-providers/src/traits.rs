//! LLM Provider trait — the seam between the analysis service and HTTP.

use async_trait::async_trait;
use cuoti_core::types::{LlmResponse, Message};

use crate::error::ProviderError;

/// Per-call request options.
#[derive(Clone, Debug, Default)]
pub struct LlmRequestConfig {
    /// Maximum tokens to generate. `None` leaves it to the endpoint.
    pub max_tokens: Option<u32>,
    /// Ask for `response_format: {"type": "json_object"}`.
    pub json_mode: bool,
}

impl LlmRequestConfig {
    /// JSON mode with no token bound.
    pub fn json() -> Self {
        Self {
            json_mode: true,
            ..Default::default()
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Trait that all LLM providers must implement.
///
/// One call is one outbound request. Implementations do not retry.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a chat completion request.
    ///
    /// # Arguments
    /// * `messages` — Conversation in OpenAI format.
    /// * `model`    — Model identifier (e.g. `"gpt-4o"`).
    /// * `config`   — Token bound and JSON mode.
    ///
    /// # Returns
    /// The first choice of the completion. Empty content is not an error here.
    async fn chat(
        &self,
        messages: &[Message],
        model: &str,
        config: &LlmRequestConfig,
    ) -> Result<LlmResponse, ProviderError>;

    /// The default model for this provider instance.
    fn default_model(&self) -> &str;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}
