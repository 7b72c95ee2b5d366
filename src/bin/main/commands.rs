use std::{
    io::{self, BufRead},
    thread,
};

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use log::{debug, warn};
use pacer_core::input::ReaderCommand;

const COMMAND_QUEUE_DEPTH: usize = 8;

pub(super) static COMMANDS: Channel<CriticalSectionRawMutex, HostCommand, COMMAND_QUEUE_DEPTH> =
    Channel::new();

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum HostCommand {
    Reader(ReaderCommand),
    Status,
    Quit,
}

/// Read line commands from stdin on a plain thread and queue them for the executor.
pub(super) fn spawn_stdin_reader() -> io::Result<()> {
    thread::Builder::new()
        .name("stdin-commands".into())
        .spawn(|| {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        warn!("input: stdin read failed: {}", err);
                        break;
                    }
                };
                match parse_command(&line) {
                    Some(command) => embassy_futures::block_on(COMMANDS.send(command)),
                    None => warn!("input: unknown command {:?}", line.trim()),
                }
            }
            debug!("input: stdin closed");
        })?;
    Ok(())
}

/// Single-line command grammar.
///
/// An empty line toggles playback; `g N` seeks to word N (1-based).
pub(super) fn parse_command(line: &str) -> Option<HostCommand> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Some(HostCommand::Reader(ReaderCommand::TogglePlay));
    };

    let command = match verb {
        "p" | "toggle" => ReaderCommand::TogglePlay,
        "play" => ReaderCommand::Play,
        "pause" | "stop" => ReaderCommand::Pause,
        "s" | "ease" => ReaderCommand::RequestPause,
        "r" | "restart" => ReaderCommand::Restart,
        "b" | "prev" => ReaderCommand::Prev,
        "n" | "next" => ReaderCommand::Next,
        "+" | "faster" => ReaderCommand::Faster,
        "-" | "slower" => ReaderCommand::Slower,
        "g" | "seek" => {
            let word: usize = parts.next()?.parse().ok()?;
            ReaderCommand::Seek(word.saturating_sub(1))
        }
        "?" | "status" => return Some(HostCommand::Status),
        "q" | "quit" => return Some(HostCommand::Quit),
        _ => return None,
    };

    if parts.next().is_some() {
        return None;
    }
    Some(HostCommand::Reader(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reader_commands() {
        assert_eq!(
            parse_command(""),
            Some(HostCommand::Reader(ReaderCommand::TogglePlay))
        );
        assert_eq!(
            parse_command("  s "),
            Some(HostCommand::Reader(ReaderCommand::RequestPause))
        );
        assert_eq!(
            parse_command("+"),
            Some(HostCommand::Reader(ReaderCommand::Faster))
        );
        assert_eq!(parse_command("q"), Some(HostCommand::Quit));
        assert_eq!(parse_command("status"), Some(HostCommand::Status));
    }

    #[test]
    fn seek_takes_a_one_based_word_number() {
        assert_eq!(
            parse_command("g 120"),
            Some(HostCommand::Reader(ReaderCommand::Seek(119)))
        );
        assert_eq!(
            parse_command("seek 0"),
            Some(HostCommand::Reader(ReaderCommand::Seek(0)))
        );
        assert_eq!(parse_command("g"), None);
        assert_eq!(parse_command("g ten"), None);
    }

    #[test]
    fn rejects_unknown_or_trailing_input() {
        assert_eq!(parse_command("jump"), None);
        assert_eq!(parse_command("n 3"), None);
    }
}
