//! The structured question record and the enums that steer prompt generation.

use std::fmt;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// ParsedQuestion
// ─────────────────────────────────────────────

/// A question recovered from a model reply.
///
/// JSON uses camelCase keys. Unknown keys are ignored on input. `subject`
/// may be absent or `null`; both mean "no subject".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuestion {
    pub question_text: String,
    pub answer_text: String,
    pub analysis: String,
    /// Always a list, possibly empty. A bare string is rejected.
    pub knowledge_points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

// ─────────────────────────────────────────────
// Language
// ─────────────────────────────────────────────

/// Output language for prompts and model replies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Zh,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }
}

impl From<&str> for Language {
    /// Anything other than `en` falls back to Chinese.
    fn from(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("en") {
            Language::En
        } else {
            Language::Zh
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────
// Grade
// ─────────────────────────────────────────────

/// Junior-high grade band used to scope knowledge points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Grade {
    Seven,
    Eight,
    Nine,
}

impl Grade {
    pub fn number(&self) -> u8 {
        match self {
            Grade::Seven => 7,
            Grade::Eight => 8,
            Grade::Nine => 9,
        }
    }

    /// Human label in the given language (e.g. `初二` / `Grade 8`).
    pub fn label(&self, language: Language) -> String {
        match language {
            Language::Zh => match self {
                Grade::Seven => "初一".to_string(),
                Grade::Eight => "初二".to_string(),
                Grade::Nine => "初三".to_string(),
            },
            Language::En => format!("Grade {}", self.number()),
        }
    }
}

impl TryFrom<u8> for Grade {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            7 => Ok(Grade::Seven),
            8 => Ok(Grade::Eight),
            9 => Ok(Grade::Nine),
            other => Err(format!("unsupported grade {other}, expected 7, 8 or 9")),
        }
    }
}

impl From<Grade> for u8 {
    fn from(g: Grade) -> u8 {
        g.number()
    }
}

// ─────────────────────────────────────────────
// DifficultyLevel
// ─────────────────────────────────────────────

/// Difficulty requested for a generated practice question.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Easy,
    #[default]
    Medium,
    Hard,
    Harder,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Medium => "medium",
            DifficultyLevel::Hard => "hard",
            DifficultyLevel::Harder => "harder",
        }
    }
}

impl From<&str> for DifficultyLevel {
    /// Unknown values fall back to `medium`.
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => DifficultyLevel::Easy,
            "hard" => DifficultyLevel::Hard,
            "harder" => DifficultyLevel::Harder,
            _ => DifficultyLevel::Medium,
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
