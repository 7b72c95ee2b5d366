impl<O> ReaderEngine<O>
where
    O: PlaybackObserver,
{
    pub fn new(observer: O, config: PacingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(observer, config))
    }

    pub fn with_defaults(observer: O) -> Self {
        Self::with_valid_config(observer, PacingConfig::default())
    }

    fn with_valid_config(observer: O, config: PacingConfig) -> Self {
        Self {
            observer,
            config,
            tokens: Vec::new(),
            position: 0,
            playback: Playback::Stopped,
            cadence: ParagraphCadence::new(),
            words_since_drain: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn config(&self) -> &PacingConfig {
        &self.config
    }

    pub fn paragraph_count(&self) -> u16 {
        self.cadence.count()
    }

    pub fn state(&self) -> PlaybackState {
        match self.playback {
            Playback::Stopped => PlaybackState::Stopped,
            Playback::Running { ramp: None, .. } => PlaybackState::Playing,
            Playback::Running {
                ramp: Some(ramp), ..
            } => match ramp.phase {
                RampPhase::Up => PlaybackState::RampingUp,
                RampPhase::Down => PlaybackState::RampingDown,
            },
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.playback, Playback::Running { .. })
    }

    /// Deadline of the pending advance, if any.
    pub fn next_due_ms(&self) -> Option<u64> {
        match self.playback {
            Playback::Running { due_ms, .. } => Some(due_ms),
            Playback::Stopped => None,
        }
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.position, self.tokens.len())
    }

    pub fn resume_state(&self) -> Option<ResumeState> {
        if self.tokens.is_empty() {
            return None;
        }
        Some(ResumeState::new(
            clamp_position(self.position, self.tokens.len()),
            self.tokens.len(),
        ))
    }

    pub fn current_frame(&self) -> Option<Frame<'_>> {
        let word = self.tokens.get(self.position)?;
        Some(Frame {
            position: self.position,
            total: self.tokens.len(),
            word,
            split: focus_split(word),
            is_break: is_paragraph_break(word),
        })
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Number of autonomous advances since the last call.
    pub fn drain_word_updates(&mut self) -> u32 {
        let count = self.words_since_drain;
        self.words_since_drain = 0;
        count
    }

    fn emit_current(&mut self, report_progress: bool) {
        let total = self.tokens.len();
        let Some(word) = self.tokens.get(self.position) else {
            return;
        };

        let frame = Frame {
            position: self.position,
            total,
            word,
            split: focus_split(word),
            is_break: is_paragraph_break(word),
        };
        self.observer.on_frame(&frame);

        if report_progress {
            self.observer
                .on_progress(Progress::new(self.position, total));
        }
    }
}
