//! Provider error type.
//!
//! Messages are worded so that keyword classification downstream can tell
//! transport, auth, and format failures apart. None of them carry the API key.

use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum ProviderError {
    /// The request never produced an HTTP response (DNS, connect, TLS, timeout).
    #[error("fetch failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status.
    #[error("API error {status}: {body}")]
    Status { status: String, body: String },

    /// The response body was not a chat completion envelope.
    #[error("could not parse provider response: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = ProviderError::Request("error sending request".into());
        assert_eq!(e.to_string(), "fetch failed: error sending request");

        let e = ProviderError::Status {
            status: "401 Unauthorized".into(),
            body: "bad key".into(),
        };
        assert_eq!(e.to_string(), "API error 401 Unauthorized: bad key");

        let e = ProviderError::Decode("expected value".into());
        assert!(e.to_string().contains("parse"));
    }
}
