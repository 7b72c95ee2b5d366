use super::{InputProvider, ReaderCommand};

/// Replays a fixed list of commands, one per poll.
#[derive(Debug, Clone)]
pub struct ScriptedInput<'a> {
    commands: &'a [ReaderCommand],
    cursor: usize,
}

impl<'a> ScriptedInput<'a> {
    pub const fn new(commands: &'a [ReaderCommand]) -> Self {
        Self {
            commands,
            cursor: 0,
        }
    }

    pub fn is_drained(&self) -> bool {
        self.cursor >= self.commands.len()
    }
}

impl InputProvider for ScriptedInput<'_> {
    type Error = core::convert::Infallible;

    fn poll_command(&mut self) -> Result<Option<ReaderCommand>, Self::Error> {
        let Some(command) = self.commands.get(self.cursor).copied() else {
            return Ok(None);
        };
        self.cursor = self.cursor.saturating_add(1);
        Ok(Some(command))
    }
}
