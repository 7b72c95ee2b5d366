//! Input abstraction layer.

mod mock;

pub use mock::ScriptedInput;

/// Discrete reader operations an input surface can trigger.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReaderCommand {
    TogglePlay,
    Play,
    Pause,
    /// Decelerate to a stop when a ramp is configured.
    RequestPause,
    Restart,
    Prev,
    Next,
    Seek(usize),
    Faster,
    Slower,
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_command(&mut self) -> Result<Option<ReaderCommand>, Self::Error>;
}
