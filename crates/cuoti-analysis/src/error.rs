//! Caller-facing error categories and the keyword classifier that picks them.

use thiserror::Error;

/// The provider answered but sent no text.
///
/// Kept apart from [`ResponseFormatError`](crate::normalizer::ResponseFormatError):
/// this is an upstream condition, not a parsing defect.
#[derive(Clone, Debug, Default, Error, PartialEq, Eq)]
#[error("Empty response from AI")]
pub struct EmptyResponseError;

/// Classified failure of an analysis call.
///
/// `Display` is the category code; the underlying message is kept in
/// [`AiError::detail`] for logs.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AiError {
    #[error("AI_CONNECTION_FAILED")]
    ConnectionFailed(String),
    #[error("AI_RESPONSE_ERROR")]
    ResponseError(String),
    #[error("AI_AUTH_ERROR")]
    AuthError(String),
    #[error("AI_UNKNOWN_ERROR")]
    UnknownError(String),
}

impl AiError {
    /// Category code, e.g. `"AI_AUTH_ERROR"`.
    pub fn code(&self) -> &'static str {
        match self {
            AiError::ConnectionFailed(_) => "AI_CONNECTION_FAILED",
            AiError::ResponseError(_) => "AI_RESPONSE_ERROR",
            AiError::AuthError(_) => "AI_AUTH_ERROR",
            AiError::UnknownError(_) => "AI_UNKNOWN_ERROR",
        }
    }

    /// Message of the failure that was classified.
    pub fn detail(&self) -> &str {
        match self {
            AiError::ConnectionFailed(d)
            | AiError::ResponseError(d)
            | AiError::AuthError(d)
            | AiError::UnknownError(d) => d,
        }
    }
}

const CONNECTION_KEYWORDS: [&str; 3] = ["fetch failed", "network", "connect"];
const RESPONSE_KEYWORDS: [&str; 2] = ["invalid json", "parse"];
const AUTH_KEYWORDS: [&str; 3] = ["api key", "unauthorized", "401"];

/// Map a failure message to a category by case-insensitive keyword search.
///
/// Checked in order: connection, response format, auth. A message that
/// happens to contain an unrelated keyword is misclassified; provider error
/// contracts aren't known well enough to do better.
pub fn classify(message: &str) -> AiError {
    let msg = message.to_lowercase();
    let has_any = |keywords: &[&str]| keywords.iter().any(|k| msg.contains(k));
    let detail = message.to_string();

    if has_any(&CONNECTION_KEYWORDS) {
        AiError::ConnectionFailed(detail)
    } else if has_any(&RESPONSE_KEYWORDS) {
        AiError::ResponseError(detail)
    } else if has_any(&AUTH_KEYWORDS) {
        AiError::AuthError(detail)
    } else {
        AiError::UnknownError(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use cuoti_providers::ProviderError;

    #[test]
    fn test_connection_keywords() {
        assert_eq!(classify("fetch failed").code(), "AI_CONNECTION_FAILED");
        assert_eq!(classify("Network unreachable").code(), "AI_CONNECTION_FAILED");
        assert_eq!(classify("ECONNREFUSED: could not CONNECT").code(), "AI_CONNECTION_FAILED");
    }

    #[test]
    fn test_response_keywords() {
        assert_eq!(classify("Invalid JSON in body").code(), "AI_RESPONSE_ERROR");
        assert_eq!(classify("failed to parse").code(), "AI_RESPONSE_ERROR");
    }

    #[test]
    fn test_auth_keywords() {
        assert_eq!(classify("Incorrect API key provided").code(), "AI_AUTH_ERROR");
        assert_eq!(classify("Unauthorized").code(), "AI_AUTH_ERROR");
        assert_eq!(classify("status 401").code(), "AI_AUTH_ERROR");
    }

    #[test]
    fn test_unknown_default() {
        let err = classify("quota exceeded");
        assert_eq!(err, AiError::UnknownError("quota exceeded".to_string()));
        assert_eq!(err.to_string(), "AI_UNKNOWN_ERROR");
        assert_eq!(err.detail(), "quota exceeded");
    }

    #[test]
    fn test_connection_checked_before_auth() {
        // Keyword order matters: a 401 that mentions the network is a connection error.
        assert_eq!(classify("401 from network proxy").code(), "AI_CONNECTION_FAILED");
    }

    #[test]
    fn test_empty_response_is_not_a_format_error() {
        assert_eq!(classify(&EmptyResponseError.to_string()).code(), "AI_UNKNOWN_ERROR");
    }

    #[test]
    fn test_format_error_maps_to_response_error() {
        let err = normalize("definitely not a question").unwrap_err();
        assert_eq!(classify(&err.to_string()).code(), "AI_RESPONSE_ERROR");
    }

    #[test]
    fn test_provider_errors() {
        let transport = ProviderError::Request("error sending request for url".into());
        assert_eq!(classify(&transport.to_string()).code(), "AI_CONNECTION_FAILED");

        let status = ProviderError::Status {
            status: "401 Unauthorized".into(),
            body: "{}".into(),
        };
        assert_eq!(classify(&status.to_string()).code(), "AI_AUTH_ERROR");

        let decode = ProviderError::Decode("expected value at line 1".into());
        assert_eq!(classify(&decode.to_string()).code(), "AI_RESPONSE_ERROR");
    }
}
