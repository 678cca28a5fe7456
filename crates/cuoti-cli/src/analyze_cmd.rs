//! `cuoti analyze` and `cuoti similar` — drive the analysis service from a terminal.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use base64::Engine;
use tracing::info;

use cuoti_analysis::{AiError, AiService, OpenAiAnalyzer};
use cuoti_core::config::load_config;
use cuoti_core::utils::expand_home;
use cuoti_core::{DifficultyLevel, Grade, Language, ParsedQuestion};

use crate::helpers;

pub struct AnalyzeArgs {
    pub image: PathBuf,
    pub mime: Option<String>,
    pub language: Language,
    pub grade: Option<u8>,
    pub subject: Option<String>,
}

/// Build the service from `~/.cuoti/config.json` + env.
fn build_service() -> Result<OpenAiAnalyzer> {
    let config = load_config(None);
    OpenAiAnalyzer::from_config(&config.ai)
        .context("set OPENAI_API_KEY or ai.apiKey in ~/.cuoti/config.json")
}

pub async fn run_analyze(args: AnalyzeArgs) -> Result<u8> {
    let service = build_service()?;

    let path = expand_home(&args.image.to_string_lossy());
    let bytes = std::fs::read(&path)
        .with_context(|| format!("failed to read image: {}", path.display()))?;
    if bytes.is_empty() {
        bail!("image file is empty: {}", path.display());
    }

    let mime = args
        .mime
        .unwrap_or_else(|| helpers::guess_mime(&path).to_string());
    let grade = args
        .grade
        .map(Grade::try_from)
        .transpose()
        .map_err(anyhow::Error::msg)?;
    let image_base64 = base64::engine::general_purpose::STANDARD.encode(&bytes);

    info!(path = %path.display(), bytes = bytes.len(), mime = %mime, "analyzing image");

    let result = service
        .analyze_image(
            &image_base64,
            &mime,
            args.language,
            grade,
            args.subject.as_deref(),
        )
        .await;

    finish(result)
}

pub async fn run_similar(
    question: &str,
    knowledge_points: &[String],
    language: Language,
    difficulty: DifficultyLevel,
) -> Result<u8> {
    if question.trim().is_empty() {
        bail!("--question must not be empty");
    }
    let service = build_service()?;

    let result = service
        .generate_similar_question(question, knowledge_points, language, difficulty)
        .await;

    finish(result)
}

/// Print the record, or the error code. Returns the process exit status.
fn finish(result: Result<ParsedQuestion, AiError>) -> Result<u8> {
    match result {
        Ok(question) => {
            helpers::print_question(&question)?;
            Ok(0)
        }
        Err(err) => {
            helpers::print_ai_error(&err);
            Ok(helpers::exit_code(&err))
        }
    }
}
