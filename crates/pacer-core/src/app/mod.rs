//! Playback state machine for RSVP reading.
//!
//! The engine never sleeps. A driver feeds it a monotonic clock through
//! [`ReaderEngine::tick`] and waits until [`ReaderEngine::next_due_ms`]
//! between calls. The pending advance lives inside the playback state, so at
//! most one can exist and every operation that replaces the state cancels it.

mod ramp;

use alloc::{string::String, vec::Vec};

use log::debug;

use crate::{
    content::{TokenizeError, Tokenizer, is_paragraph_break},
    input::{InputProvider, ReaderCommand},
    pacing::{
        ConfigError, ConfigPatch, MAX_WPM, MIN_WPM, PacingConfig, ParagraphCadence, WPM_STEP,
        token_delay_ms,
    },
    render::{Frame, PlaybackObserver, Progress},
    settings::ResumeState,
    text_policy::focus_split,
};
use ramp::{Ramp, RampPhase};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    /// Nothing was due.
    Idle,
    /// Position moved forward and the next advance is scheduled.
    Advanced,
    /// The last token was passed; playback stopped on its own.
    Completed,
    /// A ramp-down ran out and playback stopped.
    RampStopped,
}

/// Externally visible playback state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    RampingUp,
    RampingDown,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Playback {
    Stopped,
    Running { due_ms: u64, ramp: Option<Ramp> },
}

/// How a freshly loaded sequence is positioned and announced.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LoadOptions {
    /// Requested start position, clamped into the sequence.
    pub start: usize,
    /// Report progress for the initial frame. Off by default so a resume
    /// does not persist a position nobody has read yet.
    pub report_progress: bool,
}

impl LoadOptions {
    pub const fn starting_at(start: usize) -> Self {
        Self {
            start,
            report_progress: false,
        }
    }

    pub const fn with_progress(mut self, report_progress: bool) -> Self {
        self.report_progress = report_progress;
        self
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read document: {0}")]
    Tokenize(#[from] TokenizeError),
}

pub struct ReaderEngine<O>
where
    O: PlaybackObserver,
{
    observer: O,
    config: PacingConfig,
    tokens: Vec<String>,
    position: usize,
    playback: Playback,
    cadence: ParagraphCadence,
    words_since_drain: u32,
}

include!("view.rs");
include!("runtime.rs");
include!("navigation.rs");
include!("input.rs");

fn clamp_position(requested: usize, total: usize) -> usize {
    requested.min(total.saturating_sub(1))
}
