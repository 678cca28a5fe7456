//! Shared CLI helpers — MIME guessing, record and error printing.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use cuoti_analysis::AiError;
use cuoti_core::ParsedQuestion;

/// Simple MIME guesser based on extension.
pub fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "bmp" => "image/bmp",
        _ => "image/jpeg",
    }
}

/// Print a record to stdout as pretty JSON.
pub fn print_question(question: &ParsedQuestion) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(question)?);
    Ok(())
}

/// Print a classified error to stderr.
pub fn print_ai_error(err: &AiError) {
    eprintln!("{} {}", "✗".red().bold(), err.code().red());
    eprintln!("  {}", user_message(err).dimmed());
}

/// Short explanation shown under the error code.
pub fn user_message(err: &AiError) -> &'static str {
    match err {
        AiError::ConnectionFailed(_) => "Could not reach the AI service. Check network or base URL.",
        AiError::ResponseError(_) => "The AI reply could not be read as a question. Try again.",
        AiError::AuthError(_) => "The AI service rejected the API key.",
        AiError::UnknownError(_) => "The AI service failed. Run with --logs for details.",
    }
}

/// Process exit code per category.
pub fn exit_code(err: &AiError) -> u8 {
    match err {
        AiError::ConnectionFailed(_) => 2,
        AiError::ResponseError(_) => 3,
        AiError::AuthError(_) => 4,
        AiError::UnknownError(_) => 1,
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime(Path::new("photo.png")), "image/png");
        assert_eq!(guess_mime(Path::new("photo.PNG")), "image/png");
        assert_eq!(guess_mime(Path::new("photo.jpg")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("photo.webp")), "image/webp");
        assert_eq!(guess_mime(Path::new("no_extension")), "image/jpeg");
    }

    #[test]
    fn test_exit_codes_distinct() {
        let codes = [
            exit_code(&AiError::ConnectionFailed(String::new())),
            exit_code(&AiError::ResponseError(String::new())),
            exit_code(&AiError::AuthError(String::new())),
            exit_code(&AiError::UnknownError(String::new())),
        ];
        for (i, a) in codes.iter().enumerate() {
            assert!(*a != 0);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
