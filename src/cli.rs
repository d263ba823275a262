use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{parse_speed, Options};
use crate::logging::LogLevel;

/// GeoBlade dialogue player
#[derive(Parser, Debug, Default)]
#[command(name = "geoblade")]
#[command(version)]
#[command(about = "Plays GeoBlade dialogue sequences from a dialogue table", long_about = None)]
pub struct Cli {
    /// Dialogue table (CSV)
    #[arg(short, long, value_name = "FILE")]
    pub lines: Option<PathBuf>,

    /// Text locale (en_US, test)
    #[arg(long, value_name = "LOCALE")]
    pub locale: Option<String>,

    /// Line the sequence starts at
    #[arg(short, long, value_name = "ID")]
    pub start: Option<String>,

    /// Disable subtitles
    #[arg(short, long)]
    pub nosubtitles: bool,

    /// Configuration directory path
    #[arg(short, long, value_name = "CONFIGDIR")]
    pub configdir: Option<String>,

    /// Log level (nothing, user, error, warning, info, debug, all or 0-6)
    #[arg(long, value_name = "LEVEL")]
    pub loglevel: Option<String>,

    /// Cancel the sequence after this many seconds
    #[arg(long = "cancel-after", value_name = "SECS")]
    pub cancel_after: Option<String>,

    /// Playback speed factor
    #[arg(long, value_name = "FACTOR")]
    pub speed: Option<String>,

    /// Check the dialogue table for dangling references and exit
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    /// Merge CLI arguments into the options struct
    pub fn merge_into_options(&self, mut opts: Options) -> Result<Options> {
        if let Some(ref lines) = self.lines {
            opts.lines = Some(lines.clone());
        }

        if let Some(ref locale) = self.locale {
            opts.locale = Some(locale.parse().context("Invalid locale")?);
        }

        if let Some(ref start) = self.start {
            opts.start = Some(start.clone());
        }

        if self.nosubtitles {
            opts.subtitles = Some(false);
        }

        if let Some(ref config_dir) = self.configdir {
            opts.config_dir = Some(config_dir.clone());
        }

        if let Some(ref level) = self.loglevel {
            opts.log_level = Some(Self::parse_log_level(level)?);
        }

        if let Some(ref secs) = self.cancel_after {
            opts.cancel_after = Some(Self::parse_cancel_after(secs)?);
        }

        if let Some(ref speed) = self.speed {
            opts.playback_speed = Some(parse_speed(speed)?);
        }

        if self.check {
            opts.check = true;
        }

        Ok(opts)
    }

    fn parse_log_level(s: &str) -> Result<LogLevel> {
        s.parse().map_err(anyhow::Error::msg)
    }

    fn parse_cancel_after(s: &str) -> Result<f32> {
        let secs: f32 = s.trim().parse().context("Invalid cancel delay")?;
        if !secs.is_finite() || secs < 0.0 {
            anyhow::bail!("Cancel delay must be zero or more seconds");
        }
        Ok(secs)
    }
}
