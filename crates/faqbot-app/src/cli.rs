//! CLI argument definitions for the faqbot application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// faqbot: a voice-enabled FAQ assistant grounded in a fixed knowledge base.
#[derive(Parser, Debug)]
#[command(name = "faqbot", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Path to the knowledge base CSV (overrides the config value).
    #[arg(short = 'k', long = "kb")]
    pub kb: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Generation model identifier.
    #[arg(short = 'm', long = "model")]
    pub model: Option<String>,

    /// Generation API style: "chat" or "completion".
    #[arg(long = "api-style")]
    pub api_style: Option<String>,

    /// Disable speech synthesis of answers.
    #[arg(long = "no-speech")]
    pub no_speech: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > FAQBOT_CONFIG env var > ~/.faqbot/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("FAQBOT_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > RUST_LOG env var > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        let env = std::env::var("RUST_LOG").ok();
        resolve_log_level_from(self.log_level.as_deref(), env.as_deref(), config_level)
    }
}

fn resolve_log_level_from(
    flag: Option<&str>,
    env: Option<&str>,
    config_level: &str,
) -> String {
    if let Some(level) = flag {
        return level.to_string();
    }
    if let Some(level) = env {
        if !level.is_empty() {
            return level.to_string();
        }
    }
    config_level.to_string()
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".faqbot").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".faqbot").join("config.toml");
    }
    PathBuf::from("config.toml")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_flag_beats_env_and_config() {
        let level = resolve_log_level_from(Some("trace"), Some("warn"), "info");
        assert_eq!(level, "trace");
    }

    #[test]
    fn test_log_level_env_beats_config() {
        let level = resolve_log_level_from(None, Some("debug"), "info");
        assert_eq!(level, "debug");
    }

    #[test]
    fn test_log_level_falls_back_to_config() {
        let level = resolve_log_level_from(None, None, "warn");
        assert_eq!(level, "warn");
    }

    #[test]
    fn test_log_level_ignores_empty_env() {
        let level = resolve_log_level_from(None, Some(""), "info");
        assert_eq!(level, "info");
    }
}
