use std::io::{self, Write};

use log::{info, warn};
use pacer_core::render::{Frame, PlaybackObserver, Progress};

/// Column the focus character is pinned to so the eye never moves.
const ORP_ANCHOR_COLUMN: usize = 24;
const FOCUS_STYLE: &str = "\x1b[1;31m";
const RESET_STYLE: &str = "\x1b[0m";
const CLEAR_LINE: &str = "\r\x1b[2K";

/// Draws each frame on a single terminal line with the focus character highlighted.
pub(super) struct TerminalObserver<W: Write> {
    out: W,
    reported: Option<Progress>,
    completed: bool,
    write_fault_logged: bool,
}

impl<W: Write> TerminalObserver<W> {
    pub(super) fn new(out: W) -> Self {
        Self {
            out,
            reported: None,
            completed: false,
            write_fault_logged: false,
        }
    }

    /// Latest progress the engine reported since the last call.
    pub(super) fn take_progress(&mut self) -> Option<Progress> {
        self.reported.take()
    }

    /// True once after playback runs off the end of the document.
    pub(super) fn take_completed(&mut self) -> bool {
        core::mem::take(&mut self.completed)
    }

    /// Leave the cursor on a fresh line before exiting.
    pub(super) fn finish(&mut self) {
        let result = writeln!(self.out).and_then(|()| self.out.flush());
        self.check(result);
    }

    fn check(&mut self, result: io::Result<()>) {
        if let Err(err) = result
            && !self.write_fault_logged
        {
            warn!("terminal: write failed: {}", err);
            self.write_fault_logged = true;
        }
    }
}

impl<W: Write> PlaybackObserver for TerminalObserver<W> {
    fn on_frame(&mut self, frame: &Frame<'_>) {
        let line = format_frame(frame);
        let result = self
            .out
            .write_all(line.as_bytes())
            .and_then(|()| self.out.flush());
        self.check(result);
    }

    fn on_progress(&mut self, progress: Progress) {
        self.reported = Some(progress);
    }

    fn on_complete(&mut self) {
        self.completed = true;
        info!("reader: reached end of document");
    }

    fn on_ramp_stopped(&mut self, position: usize) {
        info!("reader: eased to a stop at word {}", position.saturating_add(1));
    }
}

pub(super) fn format_frame(frame: &Frame<'_>) -> String {
    let split = frame.split;
    let pad = ORP_ANCHOR_COLUMN.saturating_sub(split.focus_char_index());
    let percent = Progress::new(frame.position, frame.total).percent;
    let word = if frame.is_break {
        format!("{:pad$}{}", "", split.focus)
    } else {
        format!(
            "{:pad$}{}{FOCUS_STYLE}{}{RESET_STYLE}{}",
            "", split.left, split.focus, split.right
        )
    };
    format!(
        "{CLEAR_LINE}{word}  [{:>3}% {}/{}]",
        percent,
        frame.position.saturating_add(1).min(frame.total),
        frame.total,
    )
}
