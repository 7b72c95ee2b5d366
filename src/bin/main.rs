use std::{
    fs,
    io::{self, Write},
};

use anyhow::{Context, Result};
use clap::Parser;
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Instant, Timer};
use log::{LevelFilter, info, warn};
use pacer_core::{
    app::{LoadOptions, ReaderEngine, TickResult},
    content::Tokenizer,
    pacing::PacingConfig,
    settings::{ProgressStore, ResumeState},
};

use cli::Args;
use commands::{COMMANDS, HostCommand};
use progress_store::FileProgressStore;
use progress_sync::ProgressSyncState;
use terminal::TerminalObserver;

#[path = "main/cli.rs"]
mod cli;
#[path = "main/commands.rs"]
mod commands;
#[path = "main/progress_store.rs"]
mod progress_store;
#[path = "main/progress_sync.rs"]
mod progress_sync;
#[path = "main/terminal.rs"]
mod terminal;

const PROGRESS_SAVE_DEBOUNCE_MS: u64 = 2_000;
const IDLE_WAKE_MS: u64 = 1_000;
const WPM_REPORT_INTERVAL_MS: u64 = 5_000;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(err) = run(Args::parse()).await {
        eprintln!("pacer: {err:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let document = fs::read(&args.document)
        .with_context(|| format!("failed to read {}", args.document.display()))?;
    let tokens = args
        .tokenizer()
        .tokenize(&document)
        .with_context(|| format!("failed to tokenize {}", args.document.display()))?;
    let config = PacingConfig::default()
        .merged(&args.config_patch())
        .context("invalid pacing configuration")?;

    let document_key = progress_store::document_key(&args.document);
    let mut store = FileProgressStore::new(&args.progress_dir);
    let saved = match store.load(&document_key) {
        Ok(saved) => saved,
        Err(err) => {
            warn!("progress: failed to read saved position: {}", err);
            None
        }
    };
    let start = args
        .start
        .or_else(|| saved.and_then(|resume| resume.position_for(tokens.len())))
        .unwrap_or(0);

    info!(
        "Reader started: document={} tokens={} start={} wpm={} break_every={} ramp={:?}",
        document_key,
        tokens.len(),
        start,
        config.wpm,
        config.paragraph_break_every,
        config.ramp
    );
    info!("Commands: <enter>/p toggle, s ease to stop, b/n step, g N seek, +/- speed, r restart, q quit");

    let mut engine = ReaderEngine::new(TerminalObserver::new(io::stdout()), config)?;
    engine.load(tokens, LoadOptions::starting_at(start));

    let mut progress_sync = ProgressSyncState::new(document_key, saved);
    commands::spawn_stdin_reader().context("failed to start the input thread")?;

    let loop_start = Instant::now();
    let mut report_words = 0u64;
    let mut report_start = Instant::now();

    if args.autoplay {
        engine.play(0);
    }

    loop {
        let now_ms = loop_start.elapsed().as_millis();
        if engine.tick(now_ms) == TickResult::Completed
            && engine.observer_mut().take_completed()
            && args.exit_on_complete
        {
            break;
        }

        track_reported_progress(&mut engine, &mut progress_sync, now_ms);
        progress_sync.flush_if_due(&mut store, now_ms);

        report_words = report_words.saturating_add(u64::from(engine.drain_word_updates()));
        let elapsed = report_start.elapsed();
        if elapsed >= Duration::from_millis(WPM_REPORT_INTERVAL_MS) {
            let elapsed_ms = elapsed.as_millis().max(1);
            if report_words > 0 {
                let wpm_x100 = report_words * 6_000_000 / elapsed_ms;
                info!(
                    "effective_wpm={}.{:02} target_wpm={} words={} elapsed_ms={}",
                    wpm_x100 / 100,
                    wpm_x100 % 100,
                    engine.config().wpm,
                    report_words,
                    elapsed_ms
                );
            }
            report_words = 0;
            report_start = Instant::now();
        }

        let wake_at = match engine.next_due_ms() {
            Some(due_ms) => loop_start + Duration::from_millis(due_ms),
            None => Instant::now() + Duration::from_millis(IDLE_WAKE_MS),
        };
        let Either::Second(command) = select(Timer::at(wake_at), COMMANDS.receive()).await else {
            continue;
        };

        let now_ms = loop_start.elapsed().as_millis();
        match command {
            HostCommand::Quit => break,
            HostCommand::Status => info!(
                "status: state={:?} word={}/{} paragraphs={} wpm={}",
                engine.state(),
                engine.position().saturating_add(1).min(engine.len()),
                engine.len(),
                engine.paragraph_count(),
                engine.config().wpm
            ),
            HostCommand::Reader(command) => engine.apply_command(command, now_ms),
        }
    }

    let now_ms = loop_start.elapsed().as_millis();
    track_reported_progress(&mut engine, &mut progress_sync, now_ms);
    progress_sync.flush_now(&mut store, now_ms);
    engine.observer_mut().finish();
    Ok(())
}

/// Queue the position the engine last reported for saving. Frames shown
/// without a progress report, like a silent initial load, are never saved.
fn track_reported_progress<W: Write>(
    engine: &mut ReaderEngine<TerminalObserver<W>>,
    progress_sync: &mut ProgressSyncState,
    now_ms: u64,
) {
    let total = engine.len();
    if let Some(progress) = engine.observer_mut().take_progress() {
        progress_sync.track_current(ResumeState::new(progress.position, total), now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORDS: [&str; 3] = ["one", "two", "three"];

    fn loaded_engine(options: LoadOptions) -> ReaderEngine<TerminalObserver<Vec<u8>>> {
        let mut engine = ReaderEngine::with_defaults(TerminalObserver::new(Vec::new()));
        engine.load(WORDS.iter().map(|word| word.to_string()).collect(), options);
        engine
    }

    #[test]
    fn silent_load_saves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileProgressStore::new(dir.path());
        let mut engine = loaded_engine(LoadOptions::default());
        let mut sync = ProgressSyncState::new("book.txt".into(), None);

        track_reported_progress(&mut engine, &mut sync, 0);
        sync.flush_if_due(&mut store, PROGRESS_SAVE_DEBOUNCE_MS * 2);
        track_reported_progress(&mut engine, &mut sync, PROGRESS_SAVE_DEBOUNCE_MS * 2);
        sync.flush_now(&mut store, PROGRESS_SAVE_DEBOUNCE_MS * 2);

        assert_eq!(store.load("book.txt").unwrap(), None);
    }

    #[test]
    fn read_position_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileProgressStore::new(dir.path());
        let mut engine = loaded_engine(LoadOptions::default());
        let mut sync = ProgressSyncState::new("book.txt".into(), None);

        engine.next();
        track_reported_progress(&mut engine, &mut sync, 0);
        sync.flush_if_due(&mut store, PROGRESS_SAVE_DEBOUNCE_MS);

        assert_eq!(
            store.load("book.txt").unwrap(),
            Some(ResumeState::new(1, WORDS.len()))
        );
    }

    #[test]
    fn load_with_progress_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileProgressStore::new(dir.path());
        let mut engine = loaded_engine(LoadOptions::starting_at(2).with_progress(true));
        let mut sync = ProgressSyncState::new("book.txt".into(), None);

        track_reported_progress(&mut engine, &mut sync, 0);
        sync.flush_now(&mut store, 0);

        assert_eq!(
            store.load("book.txt").unwrap(),
            Some(ResumeState::new(2, WORDS.len()))
        );
    }
}
