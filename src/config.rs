use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::dialogue::{ActorSlot, Locale, SequencerSettings, SpeakerTable};
use crate::logging::LogLevel;

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE: &str = "geoblade.cfg";

/// Dialogue table used when none is configured
pub const DEFAULT_LINES_PATH: &str = "data/dialogue_lines.csv";

/// Line played when no start line is configured
pub const DEFAULT_START_LINE: &str = "intro_01";

/// Prefix of the keys that map a speaker to an actor slot
const SPEAKER_PREFIX: &str = "speaker.";

/// Application options that can be set via CLI or config file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    // Commandline-only options
    pub config_dir: Option<String>,
    pub cancel_after: Option<f32>,
    pub check: bool,

    // Commandline and user config options
    pub lines: Option<PathBuf>,
    pub locale: Option<Locale>,
    pub start: Option<String>,
    pub subtitles: Option<bool>,
    pub log_level: Option<LogLevel>,
    pub playback_speed: Option<f32>,

    // User config only
    pub line_poll_ms: Option<u64>,
    pub actor_poll_ms: Option<u64>,
    pub line_gap_ms: Option<u64>,
    pub speakers: Vec<(String, ActorSlot)>,
}

impl Options {
    pub fn lines_path(&self) -> PathBuf {
        self.lines
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LINES_PATH))
    }

    pub fn locale(&self) -> Locale {
        self.locale.unwrap_or_default()
    }

    pub fn start_line(&self) -> &str {
        self.start.as_deref().unwrap_or(DEFAULT_START_LINE)
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level.unwrap_or_default()
    }

    pub fn playback_speed(&self) -> f32 {
        self.playback_speed.unwrap_or(1.0)
    }

    /// Sequencer tunables, with defaults for anything unset
    pub fn sequencer_settings(&self) -> SequencerSettings {
        let defaults = SequencerSettings::default();
        SequencerSettings {
            subtitles_enabled: self.subtitles.unwrap_or(defaults.subtitles_enabled),
            line_poll: self
                .line_poll_ms
                .map_or(defaults.line_poll, Duration::from_millis),
            actor_poll: self
                .actor_poll_ms
                .map_or(defaults.actor_poll, Duration::from_millis),
            line_gap: self
                .line_gap_ms
                .map_or(defaults.line_gap, Duration::from_millis),
        }
    }

    /// Default speaker table plus configured overrides
    pub fn speaker_table(&self) -> SpeakerTable {
        let mut table = SpeakerTable::with_defaults();
        for (speaker, slot) in &self.speakers {
            table.insert(speaker, *slot);
        }
        table
    }
}

/// Load configuration from geoblade.cfg in `config_dir`
///
/// A missing directory or file yields default options.
pub fn load_config(config_dir: &Option<String>) -> Result<Options> {
    let mut opts = Options {
        config_dir: config_dir.clone(),
        ..Options::default()
    };

    let Some(dir) = config_dir else {
        return Ok(opts);
    };
    let path = Path::new(dir).join(CONFIG_FILE);
    if !path.is_file() {
        log::debug!("No config file at {}", path.display());
        return Ok(opts);
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    apply_config(&data, &mut opts).with_context(|| format!("Invalid config {}", path.display()))?;
    Ok(opts)
}

/// Apply the key=value entries in `data` to `opts`
pub fn apply_config(data: &str, opts: &mut Options) -> Result<()> {
    for (key, value) in parse_entries(data) {
        apply_entry(opts, key, value)?;
    }
    Ok(())
}

fn apply_entry(opts: &mut Options, key: &str, value: &str) -> Result<()> {
    if let Some(speaker) = key.strip_prefix(SPEAKER_PREFIX) {
        let slot: ActorSlot = value.parse().map_err(anyhow::Error::msg)?;
        opts.speakers.push((speaker.to_string(), slot));
        return Ok(());
    }

    match key {
        "lines" => opts.lines = Some(PathBuf::from(value)),
        "locale" => {
            opts.locale = Some(value.parse().context("Invalid locale")?);
        }
        "start" => opts.start = Some(value.to_string()),
        "subtitles" => opts.subtitles = Some(parse_bool(value)?),
        "log_level" => {
            opts.log_level = Some(value.parse().map_err(anyhow::Error::msg)?);
        }
        "line_poll_ms" => opts.line_poll_ms = Some(parse_interval(key, value)?),
        "actor_poll_ms" => opts.actor_poll_ms = Some(parse_interval(key, value)?),
        "line_gap_ms" => {
            opts.line_gap_ms = Some(value.parse().with_context(|| format!("Invalid {}", key))?);
        }
        "playback_speed" => opts.playback_speed = Some(parse_speed(value)?),
        _ => log::warn!("Ignoring unknown config key '{}'", key),
    }
    Ok(())
}

/// Split property-file text into trimmed (key, value) pairs
///
/// `#` starts a comment that runs to the end of the line. Lines without `=`
/// are skipped with a warning.
fn parse_entries(data: &str) -> Vec<(&str, &str)> {
    let mut entries = Vec::new();
    for (index, line) in data.lines().enumerate() {
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                entries.push((key.trim(), value.trim()));
            }
            _ => log::warn!("Key without value on line {}", index + 1),
        }
    }
    entries
}

/// Parse a boolean config value
pub fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => anyhow::bail!("Invalid boolean value: {}. Valid options: true, false", s),
    }
}

/// Parse a playback speed factor
pub fn parse_speed(s: &str) -> Result<f32> {
    let speed: f32 = s.trim().parse().context("Invalid playback speed")?;
    if !speed.is_finite() || speed <= 0.0 {
        anyhow::bail!("Playback speed must be a positive number");
    }
    Ok(speed)
}

fn parse_interval(key: &str, s: &str) -> Result<u64> {
    let ms: u64 = s.parse().with_context(|| format!("Invalid {}", key))?;
    if ms == 0 {
        anyhow::bail!("{} must be at least 1", key);
    }
    Ok(ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_options_default() {
        let opts = Options::default();
        assert_eq!(opts.lines_path(), PathBuf::from(DEFAULT_LINES_PATH));
        assert_eq!(opts.locale(), Locale::EnUs);
        assert_eq!(opts.start_line(), DEFAULT_START_LINE);
        assert_eq!(opts.log_level(), LogLevel::Info);
        assert_eq!(opts.playback_speed(), 1.0);
        assert_eq!(opts.sequencer_settings(), SequencerSettings::default());
    }

    #[test]
    fn test_apply_config() {
        let mut opts = Options::default();
        let data = "\
# GeoBlade settings
lines = content/lines.csv
locale = test   # for the test table
subtitles = no
log_level = debug
line_poll_ms = 20
actor_poll_ms=10
line_gap_ms = 0
playback_speed = 2.5
speaker.Narrator = iris
";
        apply_config(data, &mut opts).unwrap();

        assert_eq!(opts.lines_path(), PathBuf::from("content/lines.csv"));
        assert_eq!(opts.locale(), Locale::Test);
        assert_eq!(opts.log_level(), LogLevel::Debug);
        assert_eq!(opts.playback_speed(), 2.5);

        let settings = opts.sequencer_settings();
        assert!(!settings.subtitles_enabled);
        assert_eq!(settings.line_poll, Duration::from_millis(20));
        assert_eq!(settings.actor_poll, Duration::from_millis(10));
        assert_eq!(settings.line_gap, Duration::ZERO);

        let speakers = opts.speaker_table();
        assert_eq!(speakers.slot("Narrator"), Some(ActorSlot::Iris));
        assert_eq!(speakers.slot("Seru"), Some(ActorSlot::Player));
    }

    #[test]
    fn test_unknown_keys_and_bare_words_are_ignored() {
        let mut opts = Options::default();
        apply_config("fullscreen = true\njust_a_word\n", &mut opts).unwrap();
        assert_eq!(opts, Options::default());
    }

    #[test]
    fn test_invalid_values() {
        for data in [
            "locale = fr_FR",
            "subtitles = maybe",
            "log_level = loud",
            "line_poll_ms = 0",
            "actor_poll_ms = -5",
            "playback_speed = 0",
            "speaker.Narrator = narrator",
        ] {
            let mut opts = Options::default();
            assert!(apply_config(data, &mut opts).is_err(), "{}", data);
        }
    }

    #[test]
    fn test_load_config_without_dir() {
        let opts = load_config(&None).unwrap();
        assert_eq!(opts, Options::default());
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempdir().unwrap();
        let dir_name = dir.path().to_string_lossy().into_owned();

        let opts = load_config(&Some(dir_name.clone())).unwrap();
        assert_eq!(opts.config_dir, Some(dir_name));
        assert!(opts.lines.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "start = door_02\nsubtitles = off\n").unwrap();

        let opts = load_config(&Some(dir.path().to_string_lossy().into_owned())).unwrap();
        assert_eq!(opts.start_line(), "door_02");
        assert_eq!(opts.subtitles, Some(false));
    }

    #[test]
    fn test_load_config_reports_bad_value() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "playback_speed = fast\n").unwrap();

        let err = load_config(&Some(dir.path().to_string_lossy().into_owned())).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid playback speed"));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("perhaps").is_err());
    }
}
