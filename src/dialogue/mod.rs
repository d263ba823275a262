//! Dialogue System
//!
//! Loads dialogue lines from the dialogue table and plays line chains with
//! synchronized speech and subtitles.
//!
//! # Architecture
//!
//! The dialogue system consists of:
//! - Table parsing and the line store
//! - The sequencer, which walks line chains one session at a time
//! - Host interfaces for speech playback, subtitles and actor lookup
//! - Simulated host services for running without a game engine
//!
//! # Thread Safety
//!
//! Sessions run as tokio tasks. Audio completion callbacks may come from
//! any thread; the in-flight line is protected by a Mutex.

pub mod audio;
pub mod cancel;
pub mod sequencer;
pub mod sim;
pub mod speaker;
pub mod store;
pub mod subtitle;
pub mod table;
pub mod types;

#[cfg(test)]
mod tests;

pub use audio::{AudioDriver, AudioError, CompletionCallback, InFlight, PlaybackTarget};
pub use cancel::{CancelSignal, Cancelled};
pub use sequencer::{
    DialogueSequencer, SequencerSettings, SessionHandle, ACTOR_POLL_INTERVAL, LINE_GAP,
    LINE_POLL_INTERVAL,
};
pub use speaker::{ActorDirectory, ActorSlot, SpeakerTable};
pub use store::{DialogueLine, LineStore};
pub use subtitle::{format_subtitle, SubtitleBoard, SubtitleSink};
pub use types::{
    LoadError, Locale, SequenceError, SequenceState, SessionEnd, SessionResult,
    DEFAULT_LINE_DURATION, DEFAULT_POST_DELAY, END,
};
