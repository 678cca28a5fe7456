//! LLM provider layer for Cuoti.
//!
//! # Architecture
//!
//! - [`traits::LlmProvider`] — trait that all providers implement
//! - [`http_provider::HttpProvider`] — OpenAI-compatible HTTP client
//! - [`error::ProviderError`] — transport, status, and decode failures

pub mod error;
pub mod http_provider;
pub mod traits;

pub use error::ProviderError;
pub use http_provider::{HttpProvider, DEFAULT_API_BASE};
pub use traits::{LlmProvider, LlmRequestConfig};
