use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use geoblade::config;
use geoblade::dialogue::sim::{ConsoleSubtitles, ReadyActors, TimedAudio};
use geoblade::dialogue::{DialogueSequencer, LineStore, SessionEnd};
use geoblade::{logging, Cli, Options};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration file, then let the command line override it
    let options = config::load_config(&cli.configdir)?;
    let options = cli.merge_into_options(options)?;

    logging::init(options.log_level());
    log::info!("GeoBlade dialogue player starting...");
    log_configuration(&options);

    let path = options.lines_path();
    let store = LineStore::load(&path, options.locale().tag())
        .with_context(|| format!("Failed to load dialogue from {}", path.display()))?;

    if options.check {
        return Ok(check_store(&store));
    }

    play(store, &options).await
}

fn log_configuration(options: &Options) {
    log::info!("Configuration:");
    log::info!("  Lines: {}", options.lines_path().display());
    log::info!("  Locale: {}", options.locale());
    log::info!("  Start: {}", options.start_line());
    log::info!("  Speed: {}", options.playback_speed());
    if let Some(config_dir) = &options.config_dir {
        log::info!("  Config dir: {}", config_dir);
    }
    if let Some(secs) = options.cancel_after {
        log::info!("  Cancel after: {}s", secs);
    }
}

/// Report lines whose `next_line` does not exist
fn check_store(store: &LineStore) -> ExitCode {
    let dangling = store.dangling_references();
    if dangling.is_empty() {
        println!("{} lines, no dangling references", store.len());
        return ExitCode::SUCCESS;
    }

    for (line_id, next) in &dangling {
        println!("{} -> {} (missing)", line_id, next);
    }
    println!("{} dangling reference(s) in {} lines", dangling.len(), store.len());
    ExitCode::FAILURE
}

async fn play(store: LineStore, options: &Options) -> Result<ExitCode> {
    let audio = Arc::new(TimedAudio::from_store(&store, options.playback_speed()));
    let sequencer = DialogueSequencer::new(
        Arc::new(store),
        audio,
        Some(Arc::new(ConsoleSubtitles)),
        Arc::new(ReadyActors),
        options.speaker_table(),
        options.sequencer_settings(),
    );

    let mut session = sequencer.start_sequence(options.start_line()).await;
    let result = match options.cancel_after {
        Some(secs) => {
            let delay = Duration::try_from_secs_f32(secs).unwrap_or_default();
            match tokio::time::timeout(delay, session.finished()).await {
                Ok(result) => result,
                Err(_) => {
                    log::info!("Cancelling dialogue after {:?}", delay);
                    sequencer.cancel_sequence();
                    session.finished().await
                }
            }
        }
        None => session.finished().await,
    };

    match result {
        Ok(SessionEnd::Completed) => {
            log::info!("Dialogue completed");
            Ok(ExitCode::SUCCESS)
        }
        Ok(SessionEnd::Cancelled) => {
            log::info!("Dialogue cancelled");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            log::error!("Dialogue aborted: {}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}
