//! Cuoti CLI — entry point.
//!
//! # Commands
//!
//! - `cuoti analyze IMAGE` — turn a question photo into a JSON record
//! - `cuoti similar -q QUESTION -k POINT...` — generate a practice question
//! - `cuoti onboard` — write a default config file
//! - `cuoti status` — show configuration

mod analyze_cmd;
mod helpers;
mod onboard;
mod status;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// 📒 Cuoti — AI analysis for a wrong-answer notebook
#[derive(Parser)]
#[command(name = "cuoti", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a photo of a question
    Analyze {
        /// Path to the image file
        image: PathBuf,

        /// MIME type (guessed from the extension when omitted)
        #[arg(long)]
        mime: Option<String>,

        /// Output language: zh or en
        #[arg(short, long, default_value = "zh")]
        language: String,

        /// Grade (7, 8 or 9) to scope knowledge points
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(7..=9))]
        grade: Option<u8>,

        /// Subject the question belongs to
        #[arg(short, long)]
        subject: Option<String>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Generate a practice question similar to an existing one
    Similar {
        /// The original question text
        #[arg(short, long)]
        question: String,

        /// Knowledge point (repeat for several)
        #[arg(short = 'k', long = "knowledge-point")]
        knowledge_points: Vec<String>,

        /// Output language: zh or en
        #[arg(short, long, default_value = "zh")]
        language: String,

        /// easy, medium, hard or harder
        #[arg(short, long, default_value = "medium")]
        difficulty: String,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Write a default config file
    Onboard,

    /// Show configuration status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Analyze {
            image,
            mime,
            language,
            grade,
            subject,
            logs,
        } => {
            init_logging(logs);
            analyze_cmd::run_analyze(analyze_cmd::AnalyzeArgs {
                image,
                mime,
                language: language.as_str().into(),
                grade,
                subject,
            })
            .await?
        }
        Commands::Similar {
            question,
            knowledge_points,
            language,
            difficulty,
            logs,
        } => {
            init_logging(logs);
            analyze_cmd::run_similar(
                &question,
                &knowledge_points,
                language.as_str().into(),
                difficulty.as_str().into(),
            )
            .await?
        }
        Commands::Onboard => {
            onboard::run()?;
            0
        }
        Commands::Status => {
            status::run()?;
            0
        }
    };

    Ok(ExitCode::from(code))
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("cuoti=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
