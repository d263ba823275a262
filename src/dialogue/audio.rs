//! Speech playback interface
//!
//! The host audio middleware plays each line and reports completion through
//! a callback, usually from its own thread. [`InFlight`] tracks which line
//! is currently playing so late callbacks from abandoned lines are ignored.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

/// Invoked once by the audio driver when a posted line finishes playing
pub type CompletionCallback = Box<dyn FnOnce() + Send + 'static>;

/// Errors reported by an audio driver when posting a line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AudioError {
    #[error("Audio event rejected: {0}")]
    Rejected(String),

    #[error("Audio driver unavailable")]
    Unavailable,
}

/// Emitter that speech is played from (a game object in the host)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaybackTarget {
    name: String,
}

impl PlaybackTarget {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for PlaybackTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Host audio driver
pub trait AudioDriver: Send + Sync {
    /// Select the line whose voice clip the dialogue event should play
    fn set_line_state(&self, line_id: &str);

    /// Post the dialogue event on `target`
    ///
    /// `on_complete` must be invoked once when playback ends. It may be
    /// invoked from any thread.
    fn post_line(
        &self,
        target: &PlaybackTarget,
        line_id: &str,
        on_complete: CompletionCallback,
    ) -> Result<(), AudioError>;

    /// Stop a line that is still playing
    fn stop_line(&self, _line_id: &str) {}
}

/// Identifies one playback of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineTicket(u64);

#[derive(Debug)]
struct Slot {
    ticket: LineTicket,
    line_id: String,
}

/// Tracks the single line that is in flight
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    slot: Arc<Mutex<Option<Slot>>>,
    next_ticket: Arc<AtomicU64>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `line_id` as in flight, replacing whatever was there
    pub fn begin(&self, line_id: &str) -> LineTicket {
        let ticket = LineTicket(self.next_ticket.fetch_add(1, Ordering::Relaxed) + 1);
        *self.slot.lock() = Some(Slot {
            ticket,
            line_id: line_id.to_string(),
        });
        ticket
    }

    /// Clear the slot if it still holds `ticket`
    ///
    /// Returns `false` for a stale ticket.
    pub fn finish(&self, ticket: LineTicket) -> bool {
        let mut slot = self.slot.lock();
        match slot.as_ref() {
            Some(current) if current.ticket == ticket => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Check if any line is in flight
    pub fn is_busy(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Check if `ticket` is still the line in flight
    pub fn is_pending(&self, ticket: LineTicket) -> bool {
        self.slot
            .lock()
            .as_ref()
            .is_some_and(|current| current.ticket == ticket)
    }

    /// Id of the line in flight
    pub fn line_id(&self) -> Option<String> {
        self.slot.lock().as_ref().map(|current| current.line_id.clone())
    }

    /// Build the completion callback handed to the audio driver
    pub fn completion(&self, ticket: LineTicket) -> CompletionCallback {
        let tracker = self.clone();
        Box::new(move || {
            if tracker.finish(ticket) {
                log::debug!("End of dialogue line");
            } else {
                log::debug!("Ignoring completion for a line that is no longer in flight");
            }
        })
    }
}
