//! Session-level tests for the dialogue sequencer
//!
//! The audio driver, subtitle sink and actor directory are scripted doubles
//! that write into one shared journal, so tests can check the exact order in
//! which the sequencer talks to its collaborators. All tests run on paused
//! tokio time.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::{sleep, Instant};

use super::*;

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Show(String),
    Clear,
    State(String),
    Post { line: String, target: String },
    Complete(String),
    Stop(String),
}

#[derive(Clone, Default)]
struct Journal(Arc<Mutex<Vec<Event>>>);

impl Journal {
    fn push(&self, event: Event) {
        self.0.lock().push(event);
    }

    fn events(&self) -> Vec<Event> {
        self.0.lock().clone()
    }

    fn contains(&self, event: &Event) -> bool {
        self.0.lock().contains(event)
    }

    fn position(&self, event: &Event) -> Option<usize> {
        self.0.lock().iter().position(|e| e == event)
    }

    fn posts(&self) -> Vec<String> {
        self.0
            .lock()
            .iter()
            .filter_map(|e| match e {
                Event::Post { line, .. } => Some(line.clone()),
                _ => None,
            })
            .collect()
    }

    fn shown(&self) -> Vec<String> {
        self.0
            .lock()
            .iter()
            .filter_map(|e| match e {
                Event::Show(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

/// Audio double: lines finish after a scripted duration, or wait for a
/// manual `complete` when scripted as held.
struct ScriptedAudio {
    journal: Journal,
    playback: Mutex<HashMap<String, Option<Duration>>>,
    rejected: Mutex<HashSet<String>>,
    held: Mutex<HashMap<String, CompletionCallback>>,
}

const CLIP_LENGTH: Duration = Duration::from_secs(1);

impl ScriptedAudio {
    fn new(journal: Journal) -> Self {
        Self {
            journal,
            playback: Mutex::new(HashMap::new()),
            rejected: Mutex::new(HashSet::new()),
            held: Mutex::new(HashMap::new()),
        }
    }

    fn hold(&self, line_id: &str) {
        self.playback.lock().insert(line_id.to_string(), None);
    }

    fn reject(&self, line_id: &str) {
        self.rejected.lock().insert(line_id.to_string());
    }

    fn complete(&self, line_id: &str) {
        let callback = self.held.lock().remove(line_id).expect("line was not held");
        self.journal.push(Event::Complete(line_id.to_string()));
        callback();
    }
}

impl AudioDriver for ScriptedAudio {
    fn set_line_state(&self, line_id: &str) {
        self.journal.push(Event::State(line_id.to_string()));
    }

    fn post_line(
        &self,
        target: &PlaybackTarget,
        line_id: &str,
        on_complete: CompletionCallback,
    ) -> Result<(), AudioError> {
        if self.rejected.lock().contains(line_id) {
            return Err(AudioError::Rejected(line_id.to_string()));
        }

        self.journal.push(Event::Post {
            line: line_id.to_string(),
            target: target.name().to_string(),
        });

        let length = self
            .playback
            .lock()
            .get(line_id)
            .copied()
            .unwrap_or(Some(CLIP_LENGTH));
        match length {
            Some(length) => {
                let journal = self.journal.clone();
                let line = line_id.to_string();
                tokio::spawn(async move {
                    sleep(length).await;
                    journal.push(Event::Complete(line));
                    on_complete();
                });
            }
            None => {
                self.held.lock().insert(line_id.to_string(), on_complete);
            }
        }
        Ok(())
    }

    fn stop_line(&self, line_id: &str) {
        self.journal.push(Event::Stop(line_id.to_string()));
    }
}

struct RecordingSubtitles(Journal);

impl SubtitleSink for RecordingSubtitles {
    fn show(&self, text: &str) {
        self.0.push(Event::Show(text.to_string()));
    }

    fn clear(&self) {
        self.0.push(Event::Clear);
    }
}

struct SwitchableActors {
    ready: AtomicBool,
}

impl ActorDirectory for SwitchableActors {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn target(&self, slot: ActorSlot) -> Option<PlaybackTarget> {
        Some(PlaybackTarget::new(slot.name()))
    }
}

struct Rig {
    sequencer: DialogueSequencer,
    journal: Journal,
    audio: Arc<ScriptedAudio>,
    actors: Arc<SwitchableActors>,
}

const HEADER: &str = "line_id,line_speaker,line_duration,post_delay,next_line,line_test";

fn rig(rows: &[&str]) -> Rig {
    rig_with(rows, SequencerSettings::default(), true)
}

fn rig_with(rows: &[&str], settings: SequencerSettings, with_subtitles: bool) -> Rig {
    let mut data = String::from(HEADER);
    for row in rows {
        data.push('\n');
        data.push_str(row);
    }
    let store = Arc::new(LineStore::from_csv_str(&data, "test").unwrap());

    let journal = Journal::default();
    let audio = Arc::new(ScriptedAudio::new(journal.clone()));
    let actors = Arc::new(SwitchableActors {
        ready: AtomicBool::new(true),
    });
    let subtitles: Option<Arc<dyn SubtitleSink>> = if with_subtitles {
        Some(Arc::new(RecordingSubtitles(journal.clone())))
    } else {
        None
    };

    let sequencer = DialogueSequencer::new(
        store,
        audio.clone(),
        subtitles,
        actors.clone(),
        SpeakerTable::with_defaults(),
        settings,
    );

    Rig {
        sequencer,
        journal,
        audio,
        actors,
    }
}

async fn until<F: Fn() -> bool>(condition: F) {
    for _ in 0..10_000 {
        if condition() {
            return;
        }
        sleep(Duration::from_millis(10)).await;
    }
    panic!("condition never became true");
}

fn post(line: &str, target: &str) -> Event {
    Event::Post {
        line: line.to_string(),
        target: target.to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_two_line_chain_event_order() {
    let rig = rig(&["A,Seru,5,0,B,Line A", "B,Iris,5,0,END,Line B"]);

    let mut session = rig.sequencer.start_sequence("A").await;
    assert_eq!(session.finished().await, Ok(SessionEnd::Completed));

    assert_eq!(
        rig.journal.events(),
        vec![
            Event::Show("Seru: Line A".to_string()),
            Event::State("A".to_string()),
            post("A", "player"),
            Event::Complete("A".to_string()),
            Event::Clear,
            Event::Show("Iris: Line B".to_string()),
            Event::State("B".to_string()),
            post("B", "iris"),
            Event::Complete("B".to_string()),
            Event::Clear,
        ]
    );
    assert!(!rig.sequencer.line_in_flight());
    assert!(!rig.sequencer.is_active());
    assert_eq!(rig.sequencer.state(), SequenceState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_chain_visited_in_order() {
    let rig = rig(&[
        "d1,Seru,1,0,d2,one",
        "d4,Security Droid 2,1,0,END,four",
        "d2,Unknown,1,0,d3,two",
        "d3,Security Droid 1,1,0,d4,three",
    ]);

    let mut session = rig.sequencer.start_sequence("d1").await;
    assert_eq!(session.finished().await, Ok(SessionEnd::Completed));

    assert_eq!(rig.journal.posts(), vec!["d1", "d2", "d3", "d4"]);
    assert_eq!(
        rig.journal.shown(),
        vec![
            "Seru: one",
            "Unknown: two",
            "Security Droid 1: three",
            "Security Droid 2: four"
        ]
    );
    assert!(rig.journal.contains(&post("d3", "security_droid_1")));
    assert!(rig.journal.contains(&post("d4", "security_droid_2")));
}

#[tokio::test(start_paused = true)]
async fn test_start_at_end_completes_without_lines() {
    let rig = rig(&["A,Seru,1,0,END,one"]);

    let mut session = rig.sequencer.start_sequence(END).await;
    assert_eq!(session.finished().await, Ok(SessionEnd::Completed));
    assert!(rig.journal.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_supersede_while_line_playing() {
    let rig = rig(&["A,Seru,5,0,B,Line A", "B,Seru,5,0,END,Line B", "X,Iris,5,0,END,Line X"]);
    rig.audio.hold("A");

    let mut first = rig.sequencer.start_sequence("A").await;
    until(|| rig.journal.contains(&post("A", "player"))).await;
    assert!(rig.sequencer.line_in_flight());

    let mut second = rig.sequencer.start_sequence("X").await;
    assert!(first.is_finished());
    assert_eq!(first.finished().await, Ok(SessionEnd::Cancelled));
    assert_eq!(second.finished().await, Ok(SessionEnd::Completed));
    assert_ne!(first.id(), second.id());

    let stop = rig.journal.position(&Event::Stop("A".to_string())).unwrap();
    let show_x = rig
        .journal
        .position(&Event::Show("Iris: Line X".to_string()))
        .unwrap();
    assert!(stop < show_x);
    assert_eq!(rig.journal.events()[show_x - 1], Event::Clear);
    assert!(!rig.journal.contains(&Event::Complete("A".to_string())));
    assert_eq!(rig.journal.posts(), vec!["A", "X"]);
}

#[tokio::test(start_paused = true)]
async fn test_supersede_immediately() {
    let rig = rig(&["A,Seru,5,0,END,Line A", "X,Iris,5,0,END,Line X"]);

    let mut first = rig.sequencer.start_sequence("A").await;
    let mut second = rig.sequencer.start_sequence("X").await;

    assert_eq!(first.finished().await, Ok(SessionEnd::Cancelled));
    assert_eq!(second.finished().await, Ok(SessionEnd::Completed));
    assert_eq!(rig.journal.shown(), vec!["Iris: Line X"]);
    assert_eq!(rig.journal.posts(), vec!["X"]);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_inter_line_delay() {
    let rig = rig(&["A,Seru,5,5,B,Line A", "B,Seru,5,0,END,Line B"]);

    let mut session = rig.sequencer.start_sequence("A").await;
    until(|| rig.sequencer.state() == SequenceState::InterLineDelay("A".to_string())).await;

    assert!(rig.sequencer.cancel_sequence());
    assert_eq!(session.finished().await, Ok(SessionEnd::Cancelled));

    sleep(Duration::from_secs(30)).await;
    assert_eq!(rig.journal.posts(), vec!["A"]);
    assert_eq!(rig.journal.shown(), vec!["Seru: Line A"]);
    assert!(!rig.journal.contains(&Event::Stop("A".to_string())));
    assert_eq!(rig.sequencer.state(), SequenceState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_is_prompt() {
    let rig = rig(&["A,Seru,5,60,END,Line A"]);

    let mut session = rig.sequencer.start_sequence("A").await;
    until(|| matches!(rig.sequencer.state(), SequenceState::InterLineDelay(_))).await;

    let cancelled_at = Instant::now();
    rig.sequencer.cancel_sequence();
    session.finished().await.unwrap();

    assert!(cancelled_at.elapsed() <= LINE_POLL_INTERVAL);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_when_idle() {
    let rig = rig(&["A,Seru,1,0,END,Line A"]);
    assert!(!rig.sequencer.cancel_sequence());

    let mut session = rig.sequencer.start_sequence("A").await;
    session.finished().await.unwrap();
    assert!(!rig.sequencer.cancel_sequence());
}

#[tokio::test(start_paused = true)]
async fn test_dangling_next_line() {
    let rig = rig(&["A,Seru,1,0,Z,Line A"]);

    let mut session = rig.sequencer.start_sequence("A").await;
    assert_eq!(
        session.finished().await,
        Err(SequenceError::DanglingReference {
            line_id: "Z".to_string(),
            referenced_by: Some("A".to_string()),
        })
    );
    assert!(!rig.sequencer.line_in_flight());
    assert!(!rig.sequencer.is_active());
    assert_eq!(rig.sequencer.state(), SequenceState::Idle);
    assert_eq!(rig.journal.events().last(), Some(&Event::Clear));
}

#[tokio::test(start_paused = true)]
async fn test_unknown_first_line() {
    let rig = rig(&["A,Seru,1,0,END,Line A"]);

    let mut session = rig.sequencer.start_sequence("missing").await;
    assert_eq!(
        session.finished().await,
        Err(SequenceError::DanglingReference {
            line_id: "missing".to_string(),
            referenced_by: None,
        })
    );
    assert!(rig.journal.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_unknown_speaker_uses_fallback_duration() {
    let rig = rig(&["A,Narrator,2,0,B,Long ago", "B,Seru,5,0,END,Line B"]);

    let started = Instant::now();
    let mut session = rig.sequencer.start_sequence("A").await;
    until(|| rig.journal.contains(&post("B", "player"))).await;

    let waited = started.elapsed();
    assert!(waited >= Duration::from_secs(2), "waited {:?}", waited);
    assert!(waited < Duration::from_secs(3), "waited {:?}", waited);

    assert_eq!(session.finished().await, Ok(SessionEnd::Completed));
    assert_eq!(rig.journal.posts(), vec!["B"]);
    assert_eq!(rig.journal.shown()[0], "Narrator: Long ago");
}

#[tokio::test(start_paused = true)]
async fn test_rejected_post_uses_fallback_duration() {
    let rig = rig(&["A,Seru,1.5,0,END,Line A"]);
    rig.audio.reject("A");

    let started = Instant::now();
    let mut session = rig.sequencer.start_sequence("A").await;
    assert_eq!(session.finished().await, Ok(SessionEnd::Completed));

    assert!(started.elapsed() >= Duration::from_millis(1500));
    assert!(rig.journal.posts().is_empty());
    assert!(!rig.sequencer.line_in_flight());
}

#[tokio::test(start_paused = true)]
async fn test_waits_for_actor_directory() {
    let rig = rig(&["A,Iris,5,0,END,Line A"]);
    rig.actors.ready.store(false, Ordering::SeqCst);

    let mut session = rig.sequencer.start_sequence("A").await;
    sleep(Duration::from_secs(1)).await;
    assert!(rig.journal.posts().is_empty());
    assert!(rig.sequencer.is_active());

    rig.actors.ready.store(true, Ordering::SeqCst);
    assert_eq!(session.finished().await, Ok(SessionEnd::Completed));
    assert_eq!(rig.journal.posts(), vec!["A"]);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_while_waiting_for_actor_directory() {
    let rig = rig(&["A,Iris,5,0,END,Line A"]);
    rig.actors.ready.store(false, Ordering::SeqCst);

    let mut session = rig.sequencer.start_sequence("A").await;
    sleep(Duration::from_millis(200)).await;
    rig.sequencer.cancel_sequence();

    assert_eq!(session.finished().await, Ok(SessionEnd::Cancelled));
    assert!(rig.journal.posts().is_empty());
    assert_eq!(rig.journal.events().last(), Some(&Event::Clear));
}

#[tokio::test(start_paused = true)]
async fn test_stale_completion_does_not_release_next_line() {
    let rig = rig(&["A,Seru,5,0,END,Line A", "X,Iris,5,0,END,Line X"]);
    rig.audio.hold("A");
    rig.audio.hold("X");

    let mut first = rig.sequencer.start_sequence("A").await;
    until(|| rig.journal.contains(&post("A", "player"))).await;

    let mut second = rig.sequencer.start_sequence("X").await;
    assert_eq!(first.finished().await, Ok(SessionEnd::Cancelled));
    until(|| rig.journal.contains(&post("X", "iris"))).await;

    rig.audio.complete("A");
    sleep(Duration::from_secs(1)).await;
    assert!(rig.sequencer.line_in_flight());
    assert_eq!(rig.sequencer.state(), SequenceState::PlayingLine("X".to_string()));

    rig.audio.complete("X");
    assert_eq!(second.finished().await, Ok(SessionEnd::Completed));
}

#[tokio::test(start_paused = true)]
async fn test_post_delay_applied_between_lines() {
    let rig = rig(&["A,Seru,5,2,B,Line A", "B,Seru,5,0,END,Line B"]);

    let started = Instant::now();
    let mut session = rig.sequencer.start_sequence("A").await;
    until(|| rig.journal.contains(&post("B", "player"))).await;

    // clip, post-delay and line gap
    assert!(started.elapsed() >= Duration::from_millis(3100));
    session.finished().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_subtitles_disabled() {
    let settings = SequencerSettings {
        subtitles_enabled: false,
        ..SequencerSettings::default()
    };
    let rig = rig_with(&["A,Seru,1,0,END,Line A"], settings, true);

    let mut session = rig.sequencer.start_sequence("A").await;
    assert_eq!(session.finished().await, Ok(SessionEnd::Completed));

    assert!(rig.journal.shown().is_empty());
    assert!(!rig.journal.contains(&Event::Clear));
    assert_eq!(rig.journal.posts(), vec!["A"]);
}

#[tokio::test(start_paused = true)]
async fn test_without_subtitle_sink() {
    let rig = rig_with(&["A,Seru,1,0,END,Line A"], SequencerSettings::default(), false);

    let mut session = rig.sequencer.start_sequence("A").await;
    assert_eq!(session.finished().await, Ok(SessionEnd::Completed));
    assert_eq!(rig.journal.posts(), vec!["A"]);
    assert!(rig.journal.shown().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_restart_after_completion() {
    let rig = rig(&["A,Seru,1,0,END,Line A"]);

    let mut first = rig.sequencer.start_sequence("A").await;
    first.finished().await.unwrap();
    let mut second = rig.sequencer.start_sequence("A").await;

    assert_eq!(second.finished().await, Ok(SessionEnd::Completed));
    assert_eq!(rig.journal.posts(), vec!["A", "A"]);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_starts_serialize() {
    let rig = Arc::new(rig(&[
        "A,Seru,5,0,END,Line A",
        "B,Seru,5,0,END,Line B",
        "C,Seru,5,0,END,Line C",
    ]));

    let starts: Vec<_> = ["A", "B", "C"]
        .into_iter()
        .map(|id| {
            let rig = Arc::clone(&rig);
            tokio::spawn(async move { rig.sequencer.start_sequence(id).await })
        })
        .collect();

    let mut handles = Vec::new();
    for start in starts {
        handles.push(start.await.unwrap());
    }

    let mut completed = 0;
    for handle in &mut handles {
        if handle.finished().await == Ok(SessionEnd::Completed) {
            completed += 1;
        }
    }
    assert_eq!(completed, 1);
    assert!(!rig.sequencer.line_in_flight());
}

#[tokio::test(start_paused = true)]
async fn test_superseded_session_stays_active_while_winding_down() {
    let rig = Arc::new(rig(&["A,Seru,5,0,END,Line A", "X,Iris,5,0,END,Line X"]));
    rig.audio.hold("A");

    let mut first = rig.sequencer.start_sequence("A").await;
    until(|| rig.journal.contains(&post("A", "player"))).await;

    let starter = {
        let rig = Arc::clone(&rig);
        tokio::spawn(async move { rig.sequencer.start_sequence("X").await })
    };
    sleep(Duration::from_millis(10)).await;

    assert!(!first.is_finished());
    assert!(rig.sequencer.line_in_flight());
    assert!(rig.sequencer.is_active());

    let mut second = starter.await.unwrap();
    assert_eq!(first.finished().await, Ok(SessionEnd::Cancelled));
    assert_eq!(second.finished().await, Ok(SessionEnd::Completed));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_while_line_audio_playing() {
    let rig = rig(&["A,Seru,5,0,B,Line A", "B,Seru,5,0,END,Line B"]);
    rig.audio.hold("A");

    let mut session = rig.sequencer.start_sequence("A").await;
    until(|| rig.journal.contains(&post("A", "player"))).await;
    assert!(rig.sequencer.line_in_flight());

    assert!(rig.sequencer.cancel_sequence());
    assert_eq!(session.finished().await, Ok(SessionEnd::Cancelled));
    assert!(!rig.sequencer.line_in_flight());

    let events = rig.journal.events();
    assert!(events.contains(&Event::Stop("A".to_string())));
    assert_eq!(events.last(), Some(&Event::Clear));

    // The driver reporting late must not disturb anything.
    rig.audio.complete("A");
    sleep(Duration::from_secs(10)).await;
    assert!(!rig.sequencer.line_in_flight());
    assert_eq!(rig.journal.posts(), vec!["A"]);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_unknown_speaker_hold() {
    let rig = rig(&["A,Narrator,30,0,B,Long ago", "B,Seru,5,0,END,Line B"]);

    let mut session = rig.sequencer.start_sequence("A").await;
    until(|| rig.journal.contains(&Event::Show("Narrator: Long ago".to_string()))).await;
    sleep(Duration::from_secs(1)).await;
    assert!(rig.sequencer.line_in_flight());

    assert!(rig.sequencer.cancel_sequence());
    assert_eq!(session.finished().await, Ok(SessionEnd::Cancelled));
    assert!(!rig.sequencer.line_in_flight());

    assert_eq!(rig.journal.events().last(), Some(&Event::Clear));
    assert!(!rig.journal.contains(&Event::Stop("A".to_string())));
    assert!(rig.journal.posts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_huge_post_delay_waits_until_cancelled() {
    let rig = rig(&["A,Seru,1,1e19,END,Line A"]);

    let mut session = rig.sequencer.start_sequence("A").await;
    until(|| rig.sequencer.state() == SequenceState::InterLineDelay("A".to_string())).await;
    sleep(Duration::from_secs(60)).await;

    assert!(!session.is_finished());
    assert!(rig.sequencer.is_active());
    assert!(rig.sequencer.cancel_sequence());
    assert_eq!(session.finished().await, Ok(SessionEnd::Cancelled));

    assert!(!rig.sequencer.is_active());
    assert_eq!(rig.sequencer.state(), SequenceState::Idle);
    assert!(!rig.sequencer.cancel_sequence());
}

#[tokio::test(start_paused = true)]
async fn test_huge_fallback_duration_waits_until_cancelled() {
    let rig = rig(&["A,Narrator,1e19,0,END,Long ago"]);

    let mut session = rig.sequencer.start_sequence("A").await;
    until(|| rig.journal.contains(&Event::Show("Narrator: Long ago".to_string()))).await;
    sleep(Duration::from_secs(60)).await;

    assert!(rig.sequencer.line_in_flight());
    assert!(rig.sequencer.cancel_sequence());
    assert_eq!(session.finished().await, Ok(SessionEnd::Cancelled));

    assert!(!rig.sequencer.line_in_flight());
    assert_eq!(rig.sequencer.state(), SequenceState::Idle);
}

/// Audio driver whose engine blows up on the first line
struct FaultyAudio;

impl AudioDriver for FaultyAudio {
    fn set_line_state(&self, _line_id: &str) {
        panic!("audio engine fault");
    }

    fn post_line(
        &self,
        _target: &PlaybackTarget,
        _line_id: &str,
        _on_complete: CompletionCallback,
    ) -> Result<(), AudioError> {
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn test_sequencer_recovers_from_crashed_session() {
    let data = format!("{}\nA,Seru,1,0,END,Line A", HEADER);
    let store = Arc::new(LineStore::from_csv_str(&data, "test").unwrap());
    let journal = Journal::default();
    let sequencer = DialogueSequencer::new(
        store,
        Arc::new(FaultyAudio),
        Some(Arc::new(RecordingSubtitles(journal.clone()))),
        Arc::new(SwitchableActors {
            ready: AtomicBool::new(true),
        }),
        SpeakerTable::with_defaults(),
        SequencerSettings::default(),
    );

    let mut session = sequencer.start_sequence("A").await;
    assert_eq!(session.finished().await, Err(SequenceError::SessionLost));

    assert!(session.is_finished());
    assert!(!sequencer.is_active());
    assert!(!sequencer.line_in_flight());
    assert_eq!(sequencer.state(), SequenceState::Idle);
    assert!(!sequencer.cancel_sequence());
    assert_eq!(
        journal.events(),
        vec![Event::Show("Seru: Line A".to_string()), Event::Clear]
    );
}
