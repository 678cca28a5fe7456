//! Analysis service — one model request per operation, classified failures.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error, info};

use cuoti_core::config::AiConfig;
use cuoti_core::types::Message;
use cuoti_core::utils::truncate_string;
use cuoti_core::{DifficultyLevel, Grade, Language, ParsedQuestion};
use cuoti_providers::{HttpProvider, LlmProvider, LlmRequestConfig, ProviderError};

use crate::error::{classify, AiError, EmptyResponseError};
use crate::normalizer::{normalize, ResponseFormatError};
use crate::prompts;

// ─────────────────────────────────────────────
// Trait
// ─────────────────────────────────────────────

/// Question analysis capability exposed to the web layer.
///
/// Implementations hold only read-only state; calls may run concurrently.
#[async_trait]
pub trait AiService: Send + Sync {
    /// Turn a base64-encoded question photo into a record.
    async fn analyze_image(
        &self,
        image_base64: &str,
        mime_type: &str,
        language: Language,
        grade: Option<Grade>,
        subject: Option<&str>,
    ) -> Result<ParsedQuestion, AiError>;

    /// Write a new practice question on the same knowledge points.
    async fn generate_similar_question(
        &self,
        original_question: &str,
        knowledge_points: &[String],
        language: Language,
        difficulty: DifficultyLevel,
    ) -> Result<ParsedQuestion, AiError>;
}

// ─────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceConfigError {
    #[error("OPENAI_API_KEY is required for OpenAI provider")]
    MissingApiKey,
}

/// Anything that can go wrong inside one call, before classification.
#[derive(Debug, Error)]
enum CallError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Empty(#[from] EmptyResponseError),
    #[error(transparent)]
    Format(#[from] ResponseFormatError),
}

// ─────────────────────────────────────────────
// OpenAiAnalyzer
// ─────────────────────────────────────────────

/// [`AiService`] backed by an OpenAI-compatible chat completions provider.
pub struct OpenAiAnalyzer {
    provider: Arc<dyn LlmProvider>,
    model: String,
    max_tokens: u32,
}

impl std::fmt::Debug for OpenAiAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiAnalyzer")
            .field("provider", &self.provider.display_name())
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl OpenAiAnalyzer {
    /// Build an analyzer with an [`HttpProvider`] from config.
    pub fn from_config(config: &AiConfig) -> Result<Self, ServiceConfigError> {
        if !config.is_configured() {
            return Err(ServiceConfigError::MissingApiKey);
        }
        Ok(Self::new(Arc::new(HttpProvider::new(config)), config))
    }

    /// Build an analyzer over any provider. Model and token bound come from `config`.
    pub fn new(provider: Arc<dyn LlmProvider>, config: &AiConfig) -> Self {
        Self {
            provider,
            model: config.model().to_string(),
            max_tokens: config.max_tokens,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One provider call, then normalization.
    async fn complete(
        &self,
        messages: &[Message],
        request: &LlmRequestConfig,
    ) -> Result<ParsedQuestion, CallError> {
        let response = self.provider.chat(messages, &self.model, request).await?;

        let text = response.text().ok_or(EmptyResponseError)?;
        debug!(length = text.len(), raw = %text, "AI raw response");

        let question = normalize(text)?;
        debug!(
            knowledge_points = question.knowledge_points.len(),
            subject = question.subject.as_deref().unwrap_or("-"),
            "Parsed and validated result"
        );
        Ok(question)
    }
}

/// Log the failure and turn it into a caller-facing category.
fn handle_error(operation: &str, err: CallError) -> AiError {
    let classified = classify(&err.to_string());
    error!(
        operation,
        code = classified.code(),
        error = %err,
        "AI request failed"
    );
    classified
}

#[async_trait]
impl AiService for OpenAiAnalyzer {
    async fn analyze_image(
        &self,
        image_base64: &str,
        mime_type: &str,
        language: Language,
        grade: Option<Grade>,
        subject: Option<&str>,
    ) -> Result<ParsedQuestion, AiError> {
        let system_prompt = prompts::analyze_prompt(language, grade, subject);

        info!(
            model = %self.model,
            image_len = image_base64.len(),
            mime_type,
            language = %language,
            grade = grade.map_or(0, |g| g.number()),
            "AI image analysis request"
        );
        debug!(prompt = %system_prompt, "System prompt");

        let messages = [
            Message::system(system_prompt),
            Message::user_image(mime_type, image_base64),
        ];
        let request = LlmRequestConfig::json().with_max_tokens(self.max_tokens);

        self.complete(&messages, &request)
            .await
            .map_err(|e| handle_error("analyze_image", e))
    }

    async fn generate_similar_question(
        &self,
        original_question: &str,
        knowledge_points: &[String],
        language: Language,
        difficulty: DifficultyLevel,
    ) -> Result<ParsedQuestion, AiError> {
        let system_prompt = prompts::similar_question_prompt(
            language,
            original_question,
            knowledge_points,
            difficulty,
        );
        let user_prompt = prompts::similar_question_user_prompt(original_question, knowledge_points);

        info!(
            model = %self.model,
            question = %truncate_string(original_question, 100),
            knowledge_points = ?knowledge_points,
            difficulty = %difficulty,
            language = %language,
            "Generate similar question request"
        );
        debug!(system = %system_prompt, user = %user_prompt, "Prompts");

        let messages = [Message::system(system_prompt), Message::user(user_prompt)];

        self.complete(&messages, &LlmRequestConfig::json())
            .await
            .map_err(|e| handle_error("generate_similar_question", e))
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
