//! Runtime configuration for the editor and its logging backend.
//!
//! # Responsibility
//! - Hold editor limits and share targets with sensible defaults.
//! - Resolve logging settings from the process environment.
//!
//! # Invariants
//! - Defaults mirror the product rules: 1,000 words, 5 MiB images.

use crate::logging::default_log_level;
use crate::model::story::MAX_STORY_WORDS;
use std::path::PathBuf;

/// Default upper bound for attached image payloads, before base64 expansion.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
/// Default social intent endpoint for the share action.
pub const DEFAULT_SHARE_INTENT_BASE: &str = "https://twitter.com/intent/tweet";

/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "STORY_EDITOR_LOG_LEVEL";
/// Environment variable selecting the log directory.
pub const ENV_LOG_DIR: &str = "STORY_EDITOR_LOG_DIR";

/// Editor behavior knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Maximum words allowed in a story body.
    pub max_words: usize,
    /// Maximum raw image size accepted by `attach_image`.
    pub max_image_bytes: usize,
    /// Base URL receiving the `?text=` share query.
    pub share_intent_base: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_words: MAX_STORY_WORDS,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            share_intent_base: DEFAULT_SHARE_INTENT_BASE.to_string(),
        }
    }
}

impl EditorConfig {
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }

    pub fn with_share_intent_base(mut self, base: impl Into<String>) -> Self {
        self.share_intent_base = base.into();
        self
    }
}

/// Logging bootstrap input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// One of `trace|debug|info|warn|error`, case-insensitive.
    pub level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
}

impl LogSettings {
    pub fn new(level: impl Into<String>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            level: level.into(),
            log_dir: log_dir.into(),
        }
    }

    /// Reads settings from `STORY_EDITOR_LOG_LEVEL` / `STORY_EDITOR_LOG_DIR`.
    ///
    /// Returns `None` when no log directory is configured; logging stays off.
    pub fn from_env() -> Option<Self> {
        let log_dir = std::env::var(ENV_LOG_DIR).ok()?;
        let log_dir = log_dir.trim();
        if log_dir.is_empty() {
            return None;
        }
        let level = std::env::var(ENV_LOG_LEVEL)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| default_log_level().to_string());
        Some(Self::new(level, log_dir))
    }
}
