//! Cuoti analysis — question photo → structured record, via one model call.
//!
//! This crate contains:
//! - **normalizer**: direct parse → fence/prose extraction → syntax repair, each schema-validated
//! - **prompts**: system/user prompts for analysis and practice generation
//! - **service**: the [`AiService`] trait and its OpenAI-backed implementation
//! - **error**: [`AiError`] categories and the keyword classifier

pub mod error;
pub mod normalizer;
pub mod prompts;
pub mod service;

pub use error::{classify, AiError, EmptyResponseError};
pub use normalizer::{normalize, ResponseFormatError};
pub use service::{AiService, OpenAiAnalyzer, ServiceConfigError};
