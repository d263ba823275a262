//! Subtitle display
//!
//! Handles the text shown while a line is spoken.

use std::collections::VecDeque;

use parking_lot::Mutex;

/// Subtitles a [`SubtitleBoard`] remembers by default
pub const DEFAULT_HISTORY: usize = 32;

/// Host text box that displays subtitles
pub trait SubtitleSink: Send + Sync {
    fn show(&self, text: &str);
    fn clear(&self);
}

/// Subtitle text for a line
pub fn format_subtitle(speaker: &str, text: &str) -> String {
    format!("{}: {}", speaker, text)
}

/// In-memory subtitle sink
///
/// Holds the current subtitle for a UI layer to read each frame, and keeps
/// the most recent subtitles shown, up to a fixed capacity.
#[derive(Debug)]
pub struct SubtitleBoard {
    state: Mutex<BoardState>,
    capacity: usize,
}

#[derive(Debug, Default)]
struct BoardState {
    current: Option<String>,
    shown: VecDeque<String>,
}

impl SubtitleBoard {
    pub fn new() -> Self {
        Self::with_history(DEFAULT_HISTORY)
    }

    /// Board remembering at most `capacity` past subtitles
    pub fn with_history(capacity: usize) -> Self {
        Self {
            state: Mutex::new(BoardState::default()),
            capacity,
        }
    }

    /// Subtitle on screen right now
    pub fn current(&self) -> Option<String> {
        self.state.lock().current.clone()
    }

    /// Recent subtitles, oldest first
    pub fn history(&self) -> Vec<String> {
        self.state.lock().shown.iter().cloned().collect()
    }
}

impl Default for SubtitleBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SubtitleSink for SubtitleBoard {
    fn show(&self, text: &str) {
        let mut state = self.state.lock();
        state.current = Some(text.to_string());
        if self.capacity == 0 {
            return;
        }
        if state.shown.len() == self.capacity {
            state.shown.pop_front();
        }
        state.shown.push_back(text.to_string());
    }

    fn clear(&self) {
        self.state.lock().current = None;
    }
}
