//! Frame view models and the observer the engine reports to.

use crate::text_policy::FocusSplit;

/// One displayed token, decomposed around its focus character.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Frame<'a> {
    pub position: usize,
    pub total: usize,
    pub word: &'a str,
    pub split: FocusSplit<'a>,
    /// True when the frame is a paragraph-break pause.
    pub is_break: bool,
}

/// Reading progress through the loaded sequence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Progress {
    /// `floor(position * 100 / total)`, 0..=100.
    pub percent: u8,
    pub position: usize,
}

impl Progress {
    pub fn new(position: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0
        } else {
            ((position.min(total) * 100) / total) as u8
        };
        Self { percent, position }
    }
}

/// Receives everything the engine emits.
///
/// Presentation implements [`PlaybackObserver::on_frame`]; progress
/// persistence and completion handling are optional.
pub trait PlaybackObserver {
    fn on_frame(&mut self, frame: &Frame<'_>);

    fn on_progress(&mut self, _progress: Progress) {}

    /// Playback ran off the end of the sequence on its own.
    fn on_complete(&mut self) {}

    /// A requested ramp-down finished and playback stopped at `position`.
    fn on_ramp_stopped(&mut self, _position: usize) {}
}

impl<T: PlaybackObserver + ?Sized> PlaybackObserver for &mut T {
    fn on_frame(&mut self, frame: &Frame<'_>) {
        (**self).on_frame(frame);
    }

    fn on_progress(&mut self, progress: Progress) {
        (**self).on_progress(progress);
    }

    fn on_complete(&mut self) {
        (**self).on_complete();
    }

    fn on_ramp_stopped(&mut self, position: usize) {
        (**self).on_ramp_stopped(position);
    }
}
