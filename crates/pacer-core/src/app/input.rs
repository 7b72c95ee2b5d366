impl<O> ReaderEngine<O>
where
    O: PlaybackObserver,
{
    /// Drain `input` and apply every pending command.
    pub fn process_inputs<IN>(&mut self, input: &mut IN, now_ms: u64) -> Result<usize, IN::Error>
    where
        IN: InputProvider,
    {
        let mut applied = 0usize;
        while let Some(command) = input.poll_command()? {
            self.apply_command(command, now_ms);
            applied += 1;
        }
        Ok(applied)
    }

    pub fn apply_command(&mut self, command: ReaderCommand, now_ms: u64) {
        debug!("input: {:?} at position={}", command, self.position);
        match command {
            ReaderCommand::TogglePlay => {
                let _ = self.toggle_play(now_ms);
            }
            ReaderCommand::Play => {
                let _ = self.play(now_ms);
            }
            ReaderCommand::Pause => {
                let _ = self.pause();
            }
            ReaderCommand::RequestPause => {
                let _ = self.request_pause();
            }
            ReaderCommand::Restart => self.restart(),
            ReaderCommand::Prev => self.prev(),
            ReaderCommand::Next => self.next(),
            ReaderCommand::Seek(position) => self.seek(position),
            ReaderCommand::Faster => {
                let _ = self.adjust_wpm(true);
            }
            ReaderCommand::Slower => {
                let _ = self.adjust_wpm(false);
            }
        }
    }

    /// Merge `patch` into the live configuration.
    ///
    /// The merged result is validated as a whole; on error nothing changes.
    /// A pending advance keeps the deadline it was scheduled with.
    pub fn update_config(&mut self, patch: ConfigPatch) -> Result<(), ConfigError> {
        let merged = self.config.merged(&patch)?;
        if merged.paragraph_break_every != self.config.paragraph_break_every {
            self.cadence.reset();
        }
        self.config = merged;
        debug!(
            "config: wpm={} break_every={} paragraph_pause={} ramp={:?}",
            self.config.wpm,
            self.config.paragraph_break_every,
            self.config.paragraph_pause_enabled,
            self.config.ramp
        );
        Ok(())
    }

    /// Step the reading rate within the interactive range.
    pub fn adjust_wpm(&mut self, increase: bool) -> bool {
        let current = self.config.wpm;
        let next = if increase {
            current.saturating_add(WPM_STEP).min(MAX_WPM).max(current)
        } else {
            current.saturating_sub(WPM_STEP).max(MIN_WPM).min(current)
        };

        if next != current {
            self.config.wpm = next;
            true
        } else {
            false
        }
    }
}
