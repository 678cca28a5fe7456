//! Cuoti core — shared types for the wrong-answer notebook AI layer.
//!
//! - [`types`]: OpenAI chat completions wire types
//! - [`question`]: the structured question record and prompt-steering enums
//! - [`config`]: config schema, loader, env overrides
//! - [`utils`]: path and string helpers

pub mod config;
pub mod question;
pub mod types;
pub mod utils;

pub use question::{DifficultyLevel, Grade, Language, ParsedQuestion};
