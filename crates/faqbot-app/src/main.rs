//! faqbot application binary - composition root.
//!
//! Ties together the faqbot crates into an interactive assistant:
//! 1. Parse CLI arguments and initialize tracing
//! 2. Load configuration from TOML
//! 3. Require the OPENAI_API_KEY credential (fatal if absent)
//! 4. Load the knowledge base CSV, or fall back to the built-in set
//! 5. Build the configured text generator and speech services
//! 6. Run the stdin session loop (typed questions, `:audio` uploads)

mod cli;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::AsyncBufReadExt;

use faqbot_chat::{AnswerEngine, SessionController, SubmitOutcome, EMPTY_QUERY_NOTICE};
use faqbot_core::{FaqbotConfig, FaqbotError};
use faqbot_kb::KnowledgeBase;
use faqbot_llm::generator_from_config;
use faqbot_speech::{HttpSynthesizer, HttpTranscriber, SpeechSynthesizer, Transcriber};

use cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config first: its log level seeds tracing when no flag or RUST_LOG
    // overrides it.
    let config_file = args.resolve_config_path();
    let mut config = FaqbotConfig::load_or_default(&config_file);
    if let Some(ref model) = args.model {
        config.generation.model = model.clone();
    }
    if let Some(ref style) = args.api_style {
        config.generation.api_style = style.clone();
    }

    // Tracing.
    let level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(level))
        .init();

    tracing::info!("Starting faqbot v{}", env!("CARGO_PKG_VERSION"));

    // Required secret; absence is a fatal startup error.
    let api_key = match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key.trim().to_string(),
        _ => {
            tracing::error!("OPENAI_API_KEY environment variable is not set");
            return Err(FaqbotError::MissingEnv("OPENAI_API_KEY".to_string()).into());
        }
    };

    // Knowledge base: load from CSV, or fall back to the built-in set when
    // the file is absent. A present-but-broken file is fatal.
    let data_dir = expand_tilde(&config.general.data_dir);
    let kb_path = args
        .kb
        .clone()
        .unwrap_or_else(|| resolve_under(&data_dir, &config.knowledge.csv_path));
    let kb = if kb_path.exists() {
        KnowledgeBase::load(&kb_path).map_err(FaqbotError::from)?
    } else {
        if config.knowledge.write_default_if_missing {
            if let Err(e) = KnowledgeBase::write_default(&kb_path) {
                tracing::warn!(error = %e, "Could not persist default knowledge base");
            }
        }
        KnowledgeBase::default_set()
    };
    tracing::info!(path = %kb_path.display(), entries = kb.len(), "Knowledge base ready");

    // Text generator, selected once from configuration.
    let generator = generator_from_config(&config.generation, &api_key)
        .map_err(FaqbotError::from)?;
    let engine = AnswerEngine::new(Arc::from(generator));

    // Speech services.
    let speech_timeout = Duration::from_secs(config.speech.request_timeout_secs);
    let transcriber = HttpTranscriber::new(
        &api_key,
        &config.speech.transcription_model,
        speech_timeout,
    )
    .map_err(FaqbotError::from)?
    .with_base_url(&config.speech.base_url);

    let mut controller = SessionController::new(engine, Arc::new(kb));
    if config.speech.synthesis_enabled && !args.no_speech {
        let output_dir = resolve_under(&data_dir, &config.speech.output_dir);
        let synthesizer = HttpSynthesizer::new(
            &api_key,
            &config.speech.synthesis_model,
            &config.speech.voice,
            output_dir,
            speech_timeout,
        )
        .map_err(FaqbotError::from)?
        .with_base_url(&config.speech.base_url);
        controller =
            controller.with_synthesizer(Arc::new(synthesizer) as Arc<dyn SpeechSynthesizer>);
    }

    run_session(&mut controller, &transcriber).await?;

    tracing::info!(session = %controller.session().id, "Session ended");
    Ok(())
}

/// Interactive stdin loop: one line per action.
async fn run_session(
    controller: &mut SessionController,
    transcriber: &HttpTranscriber,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🎤 faqbot: ask me FAQs by typing, or upload audio with `:audio <file>`.");
    println!("Commands: :history  :audio <path>  :quit");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim().to_string();

        match line.as_str() {
            ":quit" | ":q" => break,
            ":history" => print_history(controller),
            "" => println!("{EMPTY_QUERY_NOTICE}"),
            _ => match audio_command_path(&line) {
                Some("") => println!("Usage: :audio <path>"),
                Some(path) => submit_audio(controller, transcriber, Path::new(path)).await,
                None => {
                    controller.stage_query(&line);
                    let outcome = controller.submit_pending().await;
                    render_outcome(&outcome);
                }
            },
        }
    }
    Ok(())
}

/// Recognize an `:audio` command and extract its path argument.
///
/// Returns `Some("")` for a bare `:audio` (so the caller can print usage)
/// and `None` for anything that is not the command, including lines that
/// merely begin with the letters `:audio`.
fn audio_command_path(line: &str) -> Option<&str> {
    if line == ":audio" {
        return Some("");
    }
    line.strip_prefix(":audio ").map(str::trim)
}

/// Transcribe an uploaded audio file and submit the transcript.
///
/// A transcription failure means no query was captured: the fixed notice is
/// printed and nothing is logged or generated.
async fn submit_audio(
    controller: &mut SessionController,
    transcriber: &HttpTranscriber,
    path: &Path,
) {
    let audio = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            println!("Could not read audio file {}: {}", path.display(), e);
            return;
        }
    };
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("query.wav");

    match transcriber.transcribe(&audio, file_name).await {
        Ok(text) => {
            println!("🧑 You (voice): {text}");
            let outcome = controller.submit_query(&text).await;
            render_outcome(&outcome);
        }
        Err(failure) => {
            tracing::debug!(error = %failure, "Transcription failed; no query captured");
            println!("{}", failure.user_message());
        }
    }
}

fn render_outcome(outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Answered { answer, audio } => {
            println!("🤖 {answer}");
            if let Some(path) = audio {
                println!("🔊 answer audio: {}", path.display());
            }
        }
        SubmitOutcome::EmptyQuery => println!("{EMPTY_QUERY_NOTICE}"),
    }
}

fn print_history(controller: &SessionController) {
    let entries = controller.session().log().entries();
    if entries.is_empty() {
        println!("(no conversation yet)");
        return;
    }
    println!("💬 Conversation");
    for entry in entries {
        println!(
            "{} ({}): {}",
            entry.sender,
            entry.timestamp.format("%H:%M:%S"),
            entry.message
        );
    }
}

/// Expand ~ to home directory in a path string.
fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/") || path.starts_with("~\\") {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(&path[2..])
    } else {
        PathBuf::from(path)
    }
}

/// Interpret `path` relative to `base` unless it is absolute.
fn resolve_under(base: &Path, path: &str) -> PathBuf {
    let p = PathBuf::from(path);
    if p.is_absolute() {
        p
    } else {
        base.join(p)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_command_with_path() {
        assert_eq!(audio_command_path(":audio query.wav"), Some("query.wav"));
        assert_eq!(audio_command_path(":audio   query.wav  "), Some("query.wav"));
    }

    #[test]
    fn test_audio_command_bare_yields_empty_path() {
        assert_eq!(audio_command_path(":audio"), Some(""));
        assert_eq!(audio_command_path(":audio "), Some(""));
    }

    #[test]
    fn test_audio_command_prefix_words_are_not_commands() {
        assert_eq!(audio_command_path(":audiofoo"), None);
        assert_eq!(audio_command_path(":audiobook list"), None);
        assert_eq!(audio_command_path("what is :audio"), None);
    }

    #[test]
    fn test_resolve_under_keeps_absolute_paths() {
        let base = Path::new("/data");
        assert_eq!(resolve_under(base, "/tmp/faq.csv"), PathBuf::from("/tmp/faq.csv"));
        assert_eq!(resolve_under(base, "faq.csv"), PathBuf::from("/data/faq.csv"));
    }
}
