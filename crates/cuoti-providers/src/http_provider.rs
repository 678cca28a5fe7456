//! HTTP-based LLM provider for OpenAI-compatible APIs.
//!
//! Talks directly to any `/chat/completions` endpoint: OpenAI itself, or a
//! gateway/proxy selected through `AiConfig::base_url`.

use async_trait::async_trait;
use tracing::{debug, error};

use cuoti_core::config::AiConfig;
use cuoti_core::types::{
    ChatCompletionRequest, ChatCompletionResponse, LlmResponse, Message, ResponseFormat,
};
use cuoti_core::utils::truncate_string;

use crate::error::ProviderError;
use crate::traits::{LlmProvider, LlmRequestConfig};

/// Used when `AiConfig::base_url` is unset.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Longest error body carried in a [`ProviderError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 300;

// ─────────────────────────────────────────────
// HttpProvider
// ─────────────────────────────────────────────

/// An LLM provider that talks to any OpenAI-compatible HTTP API.
pub struct HttpProvider {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.openai.com/v1"`).
    api_base: String,
    /// API key for Bearer authentication.
    api_key: String,
    /// Default model for this provider instance.
    default_model: String,
    display_name: String,
}

impl std::fmt::Debug for HttpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProvider")
            .field("api_base", &self.api_base)
            .field("default_model", &self.default_model)
            .field("provider", &self.display_name)
            .finish()
    }
}

impl HttpProvider {
    /// Create a provider from the AI config.
    ///
    /// The client has no request timeout; the caller owns cancellation.
    pub fn new(config: &AiConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Create a provider around a caller-built client (proxies, timeouts, TLS).
    pub fn with_client(config: &AiConfig, client: reqwest::Client) -> Self {
        let api_base = config
            .base_url
            .clone()
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let display_name = if api_base.trim_end_matches('/') == DEFAULT_API_BASE {
            "OpenAI"
        } else {
            "OpenAI-compatible"
        };

        HttpProvider {
            client,
            api_base,
            api_key: config.api_key.clone(),
            default_model: config.model().to_string(),
            display_name: display_name.to_string(),
        }
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }
}

#[async_trait]
impl LlmProvider for HttpProvider {
    async fn chat(
        &self,
        messages: &[Message],
        model: &str,
        config: &LlmRequestConfig,
    ) -> Result<LlmResponse, ProviderError> {
        debug!(
            provider = %self.display_name,
            model = %model,
            messages = messages.len(),
            json_mode = config.json_mode,
            "Calling LLM"
        );

        let request_body = ChatCompletionRequest {
            model: model.to_string(),
            messages: messages.to_vec(),
            max_tokens: config.max_tokens,
            response_format: config.json_mode.then(ResponseFormat::json_object),
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = %self.display_name, error = %e, "HTTP request failed");
                ProviderError::Request(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(
                provider = %self.display_name,
                status = %status,
                body = %error_text,
                "API error"
            );
            return Err(ProviderError::Status {
                status: status.to_string(),
                body: truncate_string(&error_text, MAX_ERROR_BODY_CHARS),
            });
        }

        // A body cut off mid-read is a transport failure, not a format one.
        let body = response.bytes().await.map_err(|e| {
            error!(provider = %self.display_name, error = %e, "Failed to read LLM response body");
            ProviderError::Request(e.to_string())
        })?;

        let chat_resp: ChatCompletionResponse = serde_json::from_slice(&body).map_err(|e| {
            error!(provider = %self.display_name, error = %e, "Failed to parse LLM response");
            ProviderError::Decode(e.to_string())
        })?;

        let llm_resp: LlmResponse = chat_resp.into();
        debug!(
            provider = %self.display_name,
            content_len = llm_resp.content.as_deref().map_or(0, str::len),
            finish_reason = llm_resp.finish_reason.as_deref().unwrap_or("?"),
            "LLM response received"
        );
        Ok(llm_resp)
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_config(api_key: &str, base_url: Option<&str>) -> AiConfig {
        AiConfig {
            base_url: base_url.map(String::from),
            ..AiConfig::with_api_key(api_key)
        }
    }

    // ── Unit tests ──

    #[test]
    fn test_completions_url_trailing_slash() {
        let provider = HttpProvider::new(&make_config("key", Some("https://api.openai.com/v1/")));
        assert_eq!(
            provider.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_default_api_base() {
        let provider = HttpProvider::new(&make_config("key", None));
        assert_eq!(provider.api_base, DEFAULT_API_BASE);
        assert_eq!(provider.display_name(), "OpenAI");
        assert_eq!(provider.default_model(), "gpt-4o");
    }

    #[test]
    fn test_base_url_override() {
        let provider = HttpProvider::new(&make_config("key", Some("https://proxy.example/v1")));
        assert_eq!(provider.api_base, "https://proxy.example/v1");
        assert_eq!(provider.display_name(), "OpenAI-compatible");
    }

    #[test]
    fn test_debug_omits_key() {
        let provider = HttpProvider::new(&make_config("sk-very-secret", None));
        assert!(!format!("{provider:?}").contains("sk-very-secret"));
    }

    // ── Integration tests with mock server ──

    #[tokio::test]
    async fn test_chat_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-key-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-test",
                "choices": [{
                    "message": { "content": "{\"ok\": true}" },
                    "finish_reason": "stop"
                }],
                "usage": {
                    "prompt_tokens": 10,
                    "completion_tokens": 5,
                    "total_tokens": 15
                }
            })))
            .mount(&mock_server)
            .await;

        let provider = HttpProvider::new(&make_config("test-key-123", Some(&mock_server.uri())));
        let messages = vec![Message::system("sys"), Message::user("Hello")];

        let resp = provider
            .chat(&messages, "gpt-4o", &LlmRequestConfig::json())
            .await
            .unwrap();

        assert_eq!(resp.text(), Some("{\"ok\": true}"));
        assert_eq!(resp.finish_reason.as_deref(), Some("stop"));
        assert_eq!(resp.usage.as_ref().unwrap().total_tokens, 15);
    }

    #[tokio::test]
    async fn test_chat_sends_json_mode_and_max_tokens() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "max_tokens": 4096,
                "response_format": { "type": "json_object" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-body",
                "choices": [{ "message": { "content": "ok" }, "finish_reason": "stop" }],
                "usage": null
            })))
            .mount(&mock_server)
            .await;

        let provider = HttpProvider::new(&make_config("key", Some(&mock_server.uri())));
        let req_config = LlmRequestConfig::json().with_max_tokens(4096);

        // If the body matcher fails, wiremock returns 404 → we'd get an error
        let resp = provider
            .chat(&[Message::user("test")], "gpt-4o-mini", &req_config)
            .await
            .unwrap();
        assert_eq!(resp.text(), Some("ok"));
    }

    #[tokio::test]
    async fn test_chat_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": { "message": "Incorrect key", "type": "invalid_request_error" }
            })))
            .mount(&mock_server)
            .await;

        let provider = HttpProvider::new(&make_config("bad", Some(&mock_server.uri())));
        let err = provider
            .chat(&[Message::user("Hello")], "gpt-4o", &LlmRequestConfig::default())
            .await
            .unwrap_err();

        match &err {
            ProviderError::Status { status, body } => {
                assert!(status.contains("401"));
                assert!(body.contains("Incorrect key"));
            }
            other => panic!("Expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_chat_network_error() {
        // Point to a port that's not listening
        let provider = HttpProvider::new(&make_config("key", Some("http://127.0.0.1:1")));

        let err = provider
            .chat(&[Message::user("Hello")], "gpt-4o", &LlmRequestConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Request(_)));
        assert!(err.to_string().starts_with("fetch failed"));
    }

    #[tokio::test]
    async fn test_chat_undecodable_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&mock_server)
            .await;

        let provider = HttpProvider::new(&make_config("key", Some(&mock_server.uri())));
        let err = provider
            .chat(&[Message::user("Hello")], "gpt-4o", &LlmRequestConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Decode(_)));
    }

    #[tokio::test]
    async fn test_chat_body_cut_off_is_transport_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            while !request.ends_with(b"}") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            // Promise 500 bytes, send a few, then hang up.
            let _ = socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\n\
                      content-length: 500\r\n\r\n{\"choices\": [",
                )
                .await;
            let _ = socket.shutdown().await;
        });

        let base = format!("http://{addr}");
        let provider = HttpProvider::new(&make_config("key", Some(&base)));
        let err = provider
            .chat(&[Message::user("Hello")], "gpt-4o", &LlmRequestConfig::json())
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Request(_)), "{err:?}");
        assert!(err.to_string().starts_with("fetch failed"));
    }

    #[tokio::test]
    async fn test_chat_null_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-null",
                "choices": [{ "message": { "content": null }, "finish_reason": "length" }],
                "usage": null
            })))
            .mount(&mock_server)
            .await;

        let provider = HttpProvider::new(&make_config("key", Some(&mock_server.uri())));
        let resp = provider
            .chat(&[Message::user("Hello")], "gpt-4o", &LlmRequestConfig::default())
            .await
            .unwrap();

        assert!(resp.text().is_none());
        assert_eq!(resp.finish_reason.as_deref(), Some("length"));
    }
}
