use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use pacer_core::{
    content::{LineBreakMode, PlainTextTokenizer},
    pacing::{
        ConfigPatch, DEFAULT_LONG_PAUSE_MS, DEFAULT_WPM, PERMILLE, PunctuationDelays, RampConfig,
    },
};

#[derive(Debug, Parser)]
#[command(name = "pacer", version, about = "Read a plain-text document one word at a time")]
pub(super) struct Args {
    /// UTF-8 plain-text document to read.
    pub(super) document: PathBuf,

    /// Target reading rate in words per minute.
    #[arg(long, default_value_t = DEFAULT_WPM, value_parser = clap::value_parser!(u16).range(1..))]
    pub(super) wpm: u16,

    /// Force a long pause every N paragraph breaks (0 disables it).
    #[arg(long, default_value_t = 0)]
    pub(super) break_every: u16,

    /// Show paragraph breaks as a blank frame without extra delay.
    #[arg(long)]
    pub(super) no_paragraph_pause: bool,

    /// Duration of the forced paragraph pause.
    #[arg(long, default_value_t = DEFAULT_LONG_PAUSE_MS)]
    pub(super) long_pause_ms: u32,

    /// Scale punctuation pauses with reading speed instead of adding fixed milliseconds.
    #[arg(long)]
    pub(super) proportional: bool,

    /// Number of words used to ramp speed up after play and down on a soft pause (0 disables).
    #[arg(long, default_value_t = 0)]
    pub(super) ramp_steps: u8,

    /// Slowest ramp multiplier.
    #[arg(long, default_value_t = 3.0)]
    pub(super) ramp_max: f32,

    /// Start position; overrides saved progress.
    #[arg(long)]
    pub(super) start: Option<usize>,

    /// Directory holding saved reading positions.
    #[arg(long, default_value = ".pacer")]
    pub(super) progress_dir: PathBuf,

    /// Where paragraph breaks are placed in the document.
    #[arg(long, value_enum, default_value_t = LineBreaks::Blank)]
    pub(super) line_breaks: LineBreaks,

    /// Start playing right after loading.
    #[arg(long)]
    pub(super) autoplay: bool,

    /// Exit once the end of the document is reached.
    #[arg(long)]
    pub(super) exit_on_complete: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(super) enum LineBreaks {
    /// Every line ends a paragraph.
    Every,
    /// Blank lines separate paragraphs.
    Blank,
    /// Ignore line structure.
    Ignore,
}

impl From<LineBreaks> for LineBreakMode {
    fn from(value: LineBreaks) -> Self {
        match value {
            LineBreaks::Every => Self::EveryLine,
            LineBreaks::Blank => Self::BlankLine,
            LineBreaks::Ignore => Self::Ignore,
        }
    }
}

impl Args {
    pub(super) fn config_patch(&self) -> ConfigPatch {
        let mut patch = ConfigPatch::new()
            .with_wpm(self.wpm)
            .with_paragraph_break_every(self.break_every)
            .with_paragraph_pause(!self.no_paragraph_pause)
            .with_long_pause_ms(self.long_pause_ms)
            .with_ramp(self.ramp());

        if self.proportional {
            patch = patch.with_punctuation(PunctuationDelays::proportional_default());
        }
        patch
    }

    pub(super) fn tokenizer(&self) -> PlainTextTokenizer {
        PlainTextTokenizer::new(self.line_breaks.into())
    }

    fn ramp(&self) -> Option<RampConfig> {
        if self.ramp_steps == 0 {
            return None;
        }
        let max_factor = (self.ramp_max.max(0.0) * PERMILLE as f32).round();
        Some(RampConfig {
            steps: self.ramp_steps,
            max_factor: max_factor.min(f32::from(u16::MAX)) as u16,
        })
    }
}
