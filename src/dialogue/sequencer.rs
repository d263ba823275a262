//! Dialogue sequencer
//!
//! Plays a chain of dialogue lines one at a time. Each session runs as its
//! own tokio task and walks `next_line` links until it reaches [`END`],
//! waiting on the audio driver's completion callback between lines.
//!
//! # Sessions
//!
//! At most one session is active. [`DialogueSequencer::start_sequence`]
//! cancels the active session and waits for it to wind down before the new
//! one is spawned, so the old line's audio is stopped and its subtitle is
//! cleared before the first new line appears.
//!
//! # Suspension points
//!
//! - the in-flight line clearing (completion callback or fallback timer)
//! - the actor directory producing a target for the speaker
//! - the post-delay and the gap between lines
//!
//! All of them poll the session's cancellation signal.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{watch, Mutex as AsyncMutex};

use super::audio::{AudioDriver, InFlight, LineTicket};
use super::cancel::{self, CancelSignal, Cancelled};
use super::speaker::{ActorDirectory, SpeakerTable};
use super::store::{DialogueLine, LineStore};
use super::subtitle::{format_subtitle, SubtitleSink};
use super::types::{SequenceError, SequenceState, SessionEnd, SessionResult, END};

/// Default interval for polling the in-flight line
pub const LINE_POLL_INTERVAL: Duration = Duration::from_millis(250);
/// Default interval for polling the actor directory
pub const ACTOR_POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Default pause between two lines
pub const LINE_GAP: Duration = Duration::from_millis(100);

/// Tunables for the sequencer
#[derive(Debug, Clone, PartialEq)]
pub struct SequencerSettings {
    pub subtitles_enabled: bool,
    pub line_poll: Duration,
    pub actor_poll: Duration,
    pub line_gap: Duration,
}

impl Default for SequencerSettings {
    fn default() -> Self {
        Self {
            subtitles_enabled: true,
            line_poll: LINE_POLL_INTERVAL,
            actor_poll: ACTOR_POLL_INTERVAL,
            line_gap: LINE_GAP,
        }
    }
}

/// Collaborators and state shared with session tasks
struct Shared {
    store: Arc<LineStore>,
    audio: Arc<dyn AudioDriver>,
    subtitles: Option<Arc<dyn SubtitleSink>>,
    actors: Arc<dyn ActorDirectory>,
    speakers: SpeakerTable,
    settings: SequencerSettings,
    in_flight: InFlight,
    /// Session that last wrote the state, and the state
    state: Mutex<(u64, SequenceState)>,
}

#[derive(Clone)]
struct ActiveSession {
    id: u64,
    cancel: CancelSignal,
    outcome: watch::Receiver<Option<SessionResult>>,
}

impl ActiveSession {
    /// A session whose task is gone counts as finished
    fn is_running(&self) -> bool {
        self.outcome.borrow().is_none() && self.outcome.has_changed().is_ok()
    }
}

/// Handle to a started session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: u64,
    outcome: watch::Receiver<Option<SessionResult>>,
}

impl SessionHandle {
    /// Session number, increasing per sequencer
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Check if the session has ended
    pub fn is_finished(&self) -> bool {
        self.outcome.borrow().is_some() || self.outcome.has_changed().is_err()
    }

    /// Wait for the session to end
    pub async fn finished(&mut self) -> SessionResult {
        let outcome = self
            .outcome
            .wait_for(Option::is_some)
            .await
            .map_err(|_| SequenceError::SessionLost)?;
        outcome.clone().unwrap_or(Err(SequenceError::SessionLost))
    }
}

/// Plays dialogue chains against the host's audio, subtitle and actor services
pub struct DialogueSequencer {
    shared: Arc<Shared>,
    active: Mutex<Option<ActiveSession>>,
    starting: AsyncMutex<()>,
    next_session: AtomicU64,
}

impl DialogueSequencer {
    pub fn new(
        store: Arc<LineStore>,
        audio: Arc<dyn AudioDriver>,
        subtitles: Option<Arc<dyn SubtitleSink>>,
        actors: Arc<dyn ActorDirectory>,
        speakers: SpeakerTable,
        settings: SequencerSettings,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                store,
                audio,
                subtitles,
                actors,
                speakers,
                settings,
                in_flight: InFlight::new(),
                state: Mutex::new((0, SequenceState::Idle)),
            }),
            active: Mutex::new(None),
            starting: AsyncMutex::new(()),
            next_session: AtomicU64::new(0),
        }
    }

    /// Start playing the chain that begins at `first_line_id`
    ///
    /// Supersedes the active session, if any: it is cancelled and this call
    /// waits for it to finish before the new session is spawned. Concurrent
    /// calls are served one at a time.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub async fn start_sequence(&self, first_line_id: &str) -> SessionHandle {
        let _starting = self.starting.lock().await;

        // The previous session stays in the slot until it has wound down.
        let previous = self.active.lock().clone();
        if let Some(mut previous) = previous {
            if previous.is_running() {
                log::info!("Superseding dialogue session {}", previous.id);
                cancel::cancel(&previous.cancel);
            }
            // An Err here means the task is gone without reporting; it holds nothing.
            let _ = previous.outcome.wait_for(Option::is_some).await;
        }

        let id = self.next_session.fetch_add(1, Ordering::Relaxed) + 1;
        let signal = cancel::new_signal();
        let (report, outcome) = watch::channel(None);

        self.shared.set_state(id, SequenceState::Starting);
        *self.active.lock() = Some(ActiveSession {
            id,
            cancel: Arc::clone(&signal),
            outcome: outcome.clone(),
        });

        let shared = Arc::clone(&self.shared);
        let first = first_line_id.to_string();
        tokio::spawn(async move {
            let mut report = SessionReport {
                shared: Arc::clone(&shared),
                id,
                report,
                result: None,
            };
            report.result = Some(shared.run_session(id, first, &signal).await);
        });

        SessionHandle { id, outcome }
    }

    /// Cancel the active session
    ///
    /// Returns `false` if no session was running. The session stops at its
    /// next suspension point.
    pub fn cancel_sequence(&self) -> bool {
        match self.active.lock().as_ref() {
            Some(session) if session.is_running() => {
                log::info!("Cancelling dialogue session {}", session.id);
                cancel::cancel(&session.cancel);
                true
            }
            _ => false,
        }
    }

    /// Check if a session is running
    pub fn is_active(&self) -> bool {
        self.active
            .lock()
            .as_ref()
            .is_some_and(ActiveSession::is_running)
    }

    /// Check if a line's audio is playing
    pub fn line_in_flight(&self) -> bool {
        self.shared.in_flight.is_busy()
    }

    /// Current sequencer state
    pub fn state(&self) -> SequenceState {
        self.shared.state.lock().1.clone()
    }

    /// Line store the sequencer reads from
    pub fn store(&self) -> &LineStore {
        &self.shared.store
    }
}

impl Drop for DialogueSequencer {
    fn drop(&mut self) {
        if let Some(session) = self.active.get_mut().as_ref() {
            cancel::cancel(&session.cancel);
        }
    }
}

impl Shared {
    fn set_state(&self, session: u64, state: SequenceState) {
        let mut current = self.state.lock();
        if session >= current.0 {
            *current = (session, state);
        }
    }

    async fn run_session(&self, session: u64, first: String, signal: &CancelSignal) -> SessionResult {
        log::info!("Dialogue session {} starting at '{}'", session, first);

        let mut line_id = first;
        let mut referenced_by: Option<String> = None;

        while line_id != END {
            let Some(line) = self.store.lookup(&line_id) else {
                log::error!("Dialogue line '{}' not found", line_id);
                return Err(SequenceError::DanglingReference {
                    line_id,
                    referenced_by,
                });
            };

            if self.play_line(session, line, signal).await.is_err() {
                log::info!("Dialogue session {} cancelled at '{}'", session, line.id);
                return Ok(SessionEnd::Cancelled);
            }

            referenced_by = Some(line.id.clone());
            line_id = line.next.clone();
        }

        log::info!("Dialogue session {} completed", session);
        Ok(SessionEnd::Completed)
    }

    async fn play_line(&self, session: u64, line: &DialogueLine, signal: &CancelSignal) -> Result<(), Cancelled> {
        let poll = self.settings.line_poll;

        cancel::wait_until(|| !self.in_flight.is_busy(), poll, signal).await?;
        self.set_state(session, SequenceState::PlayingLine(line.id.clone()));

        let mut guard = LineGuard {
            shared: self,
            line_id: &line.id,
            ticket: None,
            posted: false,
            subtitle_shown: false,
        };

        if self.settings.subtitles_enabled {
            if let Some(sink) = &self.subtitles {
                sink.show(&format_subtitle(&line.speaker, &line.text));
                guard.subtitle_shown = true;
            }
        }

        self.audio.set_line_state(&line.id);

        let fallback = seconds(line.fallback_duration);
        match self.speakers.slot(&line.speaker) {
            Some(slot) => {
                let actors = &self.actors;
                let target = cancel::wait_for(
                    || if actors.is_ready() { actors.target(slot) } else { None },
                    self.settings.actor_poll,
                    signal,
                )
                .await?;

                let ticket = self.in_flight.begin(&line.id);
                guard.ticket = Some(ticket);

                match self
                    .audio
                    .post_line(&target, &line.id, self.in_flight.completion(ticket))
                {
                    Ok(()) => {
                        guard.posted = true;
                        log::debug!("Posted '{}' on {}", line.id, target);
                        cancel::wait_until(|| !self.in_flight.is_pending(ticket), poll, signal).await?;
                    }
                    Err(e) => {
                        log::warn!("Could not post dialogue line '{}': {}", line.id, e);
                        cancel::sleep_or_cancel(fallback, poll, signal).await?;
                    }
                }
            }
            None => {
                log::warn!(
                    "Invalid speaker '{}' for dialogue line '{}', holding for {:?}",
                    line.speaker,
                    line.id,
                    fallback
                );
                guard.ticket = Some(self.in_flight.begin(&line.id));
                cancel::sleep_or_cancel(fallback, poll, signal).await?;
            }
        }

        drop(guard);

        self.set_state(session, SequenceState::InterLineDelay(line.id.clone()));
        let post_delay = seconds(line.post_delay);
        if !post_delay.is_zero() {
            cancel::sleep_or_cancel(post_delay, poll, signal).await?;
        }
        cancel::sleep_or_cancel(self.settings.line_gap, poll, signal).await
    }
}

/// Publishes a session's result when its task ends, including by panic
struct SessionReport {
    shared: Arc<Shared>,
    id: u64,
    report: watch::Sender<Option<SessionResult>>,
    result: Option<SessionResult>,
}

impl Drop for SessionReport {
    fn drop(&mut self) {
        let result = self.result.take().unwrap_or_else(|| {
            log::error!("Dialogue session {} ended without a result", self.id);
            Err(SequenceError::SessionLost)
        });
        self.shared.set_state(self.id, SequenceState::Idle);
        self.report.send_replace(Some(result));
    }
}

/// Releases everything a line holds when it ends, finished or not
struct LineGuard<'a> {
    shared: &'a Shared,
    line_id: &'a str,
    ticket: Option<LineTicket>,
    posted: bool,
    subtitle_shown: bool,
}

impl Drop for LineGuard<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket {
            // Still pending means the audio never reported completion.
            if self.shared.in_flight.finish(ticket) && self.posted {
                self.shared.audio.stop_line(self.line_id);
            }
        }
        if self.subtitle_shown {
            if let Some(sink) = &self.shared.subtitles {
                sink.clear();
            }
        }
    }
}

fn seconds(value: f32) -> Duration {
    Duration::try_from_secs_f32(value.max(0.0)).unwrap_or(Duration::ZERO)
}
