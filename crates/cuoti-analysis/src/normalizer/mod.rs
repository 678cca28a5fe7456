//! Response normalizer — untrusted model text in, validated question out.
//!
//! Strategies run in order and the first schema-valid result wins:
//!
//! 1. **direct** — parse the raw text as JSON.
//! 2. **extract** — strip markdown fences and prose, keep the greedy
//!    `{ ... }` span. Also runs when (1) parsed but failed validation.
//! 3. **repair** — syntax-repair the extracted span, then parse.
//!
//! All three failing yields a [`ResponseFormatError`]. Nothing here does I/O
//! and no state outlives a call.

pub mod extract;
pub mod repair;
pub mod schema;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use cuoti_core::utils::head_chars;
use cuoti_core::ParsedQuestion;

pub use extract::extract_json;
pub use repair::{repair_json, RepairError};
pub use schema::{validate, ValidationError};

/// Characters of the original text kept for diagnostics.
pub const SAMPLE_CHARS: usize = 500;

/// Every strategy failed.
///
/// The message contains "invalid json" and "parse" so it classifies as a
/// response-format failure.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Invalid JSON response from AI: unable to parse or validate ({length} chars)")]
pub struct ResponseFormatError {
    /// Length of the original text, in characters.
    pub length: usize,
    /// First [`SAMPLE_CHARS`] characters of the original text.
    pub sample: String,
}

impl ResponseFormatError {
    fn new(raw: &str) -> Self {
        Self {
            length: raw.chars().count(),
            sample: head_chars(raw, SAMPLE_CHARS).to_string(),
        }
    }
}

/// Why one strategy gave up. Never leaves this module.
#[derive(Debug, Error)]
enum StageError {
    #[error("syntax: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error(transparent)]
    Schema(#[from] ValidationError),
    #[error("repair: {0}")]
    Repair(#[from] RepairError),
}

type Stage = fn(&str) -> Result<ParsedQuestion, StageError>;

const STAGES: [(&str, Stage); 3] = [
    ("direct", direct_stage),
    ("extract", extract_stage),
    ("repair", repair_stage),
];

/// Recover a [`ParsedQuestion`] from raw model output.
pub fn normalize(raw: &str) -> Result<ParsedQuestion, ResponseFormatError> {
    debug!(length = raw.len(), "Parsing AI response");

    for (name, stage) in STAGES {
        match stage(raw) {
            Ok(question) => {
                debug!(stage = name, "Parsed and validated AI response");
                return Ok(question);
            }
            Err(e) => warn!(stage = name, error = %e, "Normalization stage failed"),
        }
    }

    let err = ResponseFormatError::new(raw);
    error!(
        length = err.length,
        sample = %err.sample,
        "All parsing attempts failed"
    );
    Err(err)
}

fn parse_and_validate(text: &str) -> Result<ParsedQuestion, StageError> {
    let value: Value = serde_json::from_str(text)?;
    Ok(validate(value)?)
}

fn direct_stage(raw: &str) -> Result<ParsedQuestion, StageError> {
    parse_and_validate(raw)
}

fn extract_stage(raw: &str) -> Result<ParsedQuestion, StageError> {
    parse_and_validate(extract_json(raw))
}

fn repair_stage(raw: &str) -> Result<ParsedQuestion, StageError> {
    let repaired = repair_json(extract_json(raw))?;
    parse_and_validate(&repaired)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
