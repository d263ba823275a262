//! Core types for the dialogue system

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Reserved `next_line` value that terminates a sequence
pub const END: &str = "END";

/// Fallback line duration used when `line_duration` is absent or malformed
pub const DEFAULT_LINE_DURATION: f32 = 5.0;

/// Post-delay used when `post_delay` is absent or malformed
pub const DEFAULT_POST_DELAY: f32 = 0.0;

/// Locales that have a text column in the dialogue table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    EnUs,
    /// Locale used by test data sets
    Test,
}

impl Locale {
    /// Locale tag as written in configuration and column names
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::EnUs => "en_US",
            Locale::Test => "test",
        }
    }

    /// Name of the text column for this locale
    pub fn text_column(&self) -> String {
        format!("line_{}", self.tag())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en_US" => Ok(Locale::EnUs),
            "test" => Ok(Locale::Test),
            other => Err(LoadError::UnsupportedLocale(other.to_string())),
        }
    }
}

/// Errors raised while loading the dialogue table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Dialogue source unavailable: {path}: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("Dialogue table is missing column '{0}'")]
    MissingColumn(String),

    #[error("Malformed dialogue table: {0}")]
    Malformed(#[from] super::table::TableError),
}

/// Fatal errors that end a running sequence
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    #[error("Line '{line_id}' does not exist (referenced by {})", referrer(.referenced_by))]
    DanglingReference {
        line_id: String,
        referenced_by: Option<String>,
    },

    #[error("Session ended without reporting an outcome")]
    SessionLost,
}

fn referrer(referenced_by: &Option<String>) -> &str {
    referenced_by.as_deref().unwrap_or("sequence start")
}

/// How a session ended when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The chain reached `END`
    Completed,
    /// The session was cancelled or superseded
    Cancelled,
}

/// Result reported by a finished session
pub type SessionResult = Result<SessionEnd, SequenceError>;

/// Observable state of the sequencer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SequenceState {
    #[default]
    Idle,
    Starting,
    /// A line is on screen and its audio has been posted
    PlayingLine(String),
    /// Post-delay and inter-line gap after the given line
    InterLineDelay(String),
}

impl SequenceState {
    /// Line the state refers to, if any
    pub fn line_id(&self) -> Option<&str> {
        match self {
            SequenceState::PlayingLine(id) | SequenceState::InterLineDelay(id) => Some(id),
            SequenceState::Idle | SequenceState::Starting => None,
        }
    }
}
