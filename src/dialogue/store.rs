//! Dialogue line storage
//!
//! Lines are loaded once from the dialogue table and looked up by id while
//! a sequence walks the `next_line` chain.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::table::{Record, Table};
use super::types::{LoadError, Locale, DEFAULT_LINE_DURATION, DEFAULT_POST_DELAY, END};

pub const COLUMN_ID: &str = "line_id";
pub const COLUMN_SPEAKER: &str = "line_speaker";
pub const COLUMN_DURATION: &str = "line_duration";
pub const COLUMN_POST_DELAY: &str = "post_delay";
pub const COLUMN_NEXT: &str = "next_line";

/// A single line of dialogue
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueLine {
    pub id: String,
    /// Display text in the store's locale
    pub text: String,
    /// Speaker id as written in the table
    pub speaker: String,
    /// Seconds to wait when no audio completion will arrive
    pub fallback_duration: f32,
    /// Seconds to wait after the line finishes
    pub post_delay: f32,
    /// Id of the following line, or [`END`]
    pub next: String,
}

impl DialogueLine {
    /// Check if this line terminates its sequence
    pub fn is_last(&self) -> bool {
        self.next == END
    }
}

/// All dialogue lines for one locale
#[derive(Debug, Clone, Default)]
pub struct LineStore {
    locale: Locale,
    lines: HashMap<String, DialogueLine>,
}

impl LineStore {
    /// Load the dialogue table from a file
    ///
    /// The locale is checked before the file is touched.
    pub fn load<P: AsRef<Path>>(path: P, locale: &str) -> Result<Self, LoadError> {
        let locale: Locale = locale.parse()?;
        let path = path.as_ref();

        log::info!("Loading dialogue lines from {}", path.display());
        let data = fs::read_to_string(path).map_err(|e| LoadError::SourceUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let store = Self::parse(&data, locale)?;
        log::info!("Loaded {} dialogue lines ({})", store.len(), locale);
        Ok(store)
    }

    /// Load the dialogue table from a string
    pub fn from_csv_str(data: &str, locale: &str) -> Result<Self, LoadError> {
        let locale: Locale = locale.parse()?;
        Self::parse(data, locale)
    }

    fn parse(data: &str, locale: Locale) -> Result<Self, LoadError> {
        let table = Table::parse(data)?;
        let text_column = locale.text_column();

        for column in [
            COLUMN_ID,
            COLUMN_SPEAKER,
            COLUMN_DURATION,
            COLUMN_POST_DELAY,
            COLUMN_NEXT,
            text_column.as_str(),
        ] {
            if !table.has_column(column) {
                return Err(LoadError::MissingColumn(column.to_string()));
            }
        }

        let mut lines = HashMap::with_capacity(table.row_count());
        for (row, record) in table.records().enumerate() {
            let Some(id) = record.get_trimmed(COLUMN_ID) else {
                log::warn!("Skipping dialogue row {} without a line id", row + 1);
                continue;
            };

            let next = match record.get_trimmed(COLUMN_NEXT) {
                Some(next) => next.to_string(),
                None => {
                    log::warn!("Line '{}' has no next line, treating it as {}", id, END);
                    END.to_string()
                }
            };

            let line = DialogueLine {
                id: id.to_string(),
                text: record.get(&text_column).unwrap_or_default().to_string(),
                speaker: record.get_trimmed(COLUMN_SPEAKER).unwrap_or_default().to_string(),
                fallback_duration: parse_seconds(&record, id, COLUMN_DURATION, DEFAULT_LINE_DURATION),
                post_delay: parse_seconds(&record, id, COLUMN_POST_DELAY, DEFAULT_POST_DELAY),
                next,
            };

            if lines.insert(line.id.clone(), line).is_some() {
                log::warn!("Duplicate dialogue line '{}', keeping the later row", id);
            }
        }

        Ok(LineStore { locale, lines })
    }

    /// Look up a line by id
    pub fn lookup(&self, id: &str) -> Option<&DialogueLine> {
        self.lines.get(id)
    }

    /// Locale the text was loaded for
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All line ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.lines.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Lines whose `next_line` names neither [`END`] nor a known line
    ///
    /// Returned as `(line_id, next)` pairs sorted by line id.
    pub fn dangling_references(&self) -> Vec<(&str, &str)> {
        let mut dangling: Vec<(&str, &str)> = self
            .lines
            .values()
            .filter(|line| !line.is_last() && !self.lines.contains_key(&line.next))
            .map(|line| (line.id.as_str(), line.next.as_str()))
            .collect();
        dangling.sort_unstable();
        dangling
    }
}

fn parse_seconds(record: &Record<'_>, id: &str, column: &str, default: f32) -> f32 {
    let Some(raw) = record.get_trimmed(column) else {
        return default;
    };

    match raw.parse::<f32>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => {
            log::warn!(
                "Line '{}': invalid {} '{}', using {}",
                id,
                column,
                raw,
                default
            );
            default
        }
    }
}
