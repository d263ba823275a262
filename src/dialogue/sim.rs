//! Simulated host services
//!
//! Stand-ins for the game engine's audio middleware, subtitle text box and
//! actor registry, used by the command-line player. Speech is silent: each
//! line "plays" for its fallback duration, scaled by a speed factor.

use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use super::audio::{AudioDriver, AudioError, CompletionCallback, PlaybackTarget};
use super::speaker::{ActorDirectory, ActorSlot};
use super::store::LineStore;
use super::subtitle::SubtitleSink;

/// Silent audio driver that completes lines on a timer
pub struct TimedAudio {
    lengths: HashMap<String, Duration>,
    default_length: Duration,
    playing: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl TimedAudio {
    /// Clip lengths taken from each line's fallback duration divided by `speed`
    pub fn from_store(store: &LineStore, speed: f32) -> Self {
        let speed = if speed.is_finite() && speed > 0.0 { speed } else { 1.0 };
        let lengths = store
            .ids()
            .into_iter()
            .filter_map(|id| store.lookup(id))
            .map(|line| {
                let length = Duration::try_from_secs_f32(line.fallback_duration / speed)
                    .unwrap_or(Duration::ZERO);
                (line.id.clone(), length)
            })
            .collect();

        Self {
            lengths,
            default_length: Duration::from_secs(1),
            playing: Mutex::new(HashMap::new()),
        }
    }

    /// Length a line will play for
    pub fn length_of(&self, line_id: &str) -> Duration {
        self.lengths.get(line_id).copied().unwrap_or(self.default_length)
    }

    /// Number of lines currently playing
    pub fn playing_count(&self) -> usize {
        let mut playing = self.playing.lock();
        playing.retain(|_, task| !task.is_finished());
        playing.len()
    }
}

impl AudioDriver for TimedAudio {
    fn set_line_state(&self, line_id: &str) {
        log::debug!("Dialogue_Line state -> {}", line_id);
    }

    fn post_line(
        &self,
        target: &PlaybackTarget,
        line_id: &str,
        on_complete: CompletionCallback,
    ) -> Result<(), AudioError> {
        let length = self.length_of(line_id);
        log::debug!("Playing '{}' on {} for {:?}", line_id, target, length);

        let task = tokio::spawn(async move {
            tokio::time::sleep(length).await;
            on_complete();
        });
        if let Some(previous) = self.playing.lock().insert(line_id.to_string(), task) {
            previous.abort();
        }
        Ok(())
    }

    fn stop_line(&self, line_id: &str) {
        if let Some(task) = self.playing.lock().remove(line_id) {
            log::debug!("Stopping '{}'", line_id);
            task.abort();
        }
    }
}

/// Subtitle sink that prints to standard output
#[derive(Debug, Default)]
pub struct ConsoleSubtitles;

impl SubtitleSink for ConsoleSubtitles {
    fn show(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        // Nothing useful to do if stdout is gone.
        let _ = writeln!(out, "{}", text);
        let _ = out.flush();
    }

    fn clear(&self) {}
}

/// Actor directory where every actor exists from the start
#[derive(Debug, Default)]
pub struct ReadyActors;

impl ActorDirectory for ReadyActors {
    fn target(&self, slot: ActorSlot) -> Option<PlaybackTarget> {
        Some(PlaybackTarget::new(slot.name()))
    }
}
