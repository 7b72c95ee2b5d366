impl<O> ReaderEngine<O>
where
    O: PlaybackObserver,
{
    /// Start autonomous playback from the current position.
    ///
    /// Returns `false` when nothing changed: already playing, nothing loaded
    /// or the sequence is exhausted.
    pub fn play(&mut self, now_ms: u64) -> bool {
        if self.is_exhausted() {
            return false;
        }

        match self.playback {
            Playback::Running {
                due_ms,
                ramp:
                    Some(Ramp {
                        phase: RampPhase::Down,
                        ..
                    }),
            } => {
                debug!("playback: ramp-down cancelled at position={}", self.position);
                self.playback = Playback::Running { due_ms, ramp: None };
                true
            }
            Playback::Running { .. } => false,
            Playback::Stopped => {
                let ramp = self.config.ramp.map(|_| Ramp::up());
                debug!(
                    "playback: start position={}/{} wpm={} ramp={}",
                    self.position,
                    self.tokens.len(),
                    self.config.wpm,
                    ramp.is_some()
                );
                self.run_current(now_ms, ramp);
                true
            }
        }
    }

    /// Stop immediately, discarding the pending advance.
    pub fn pause(&mut self) -> bool {
        let was_running = self.is_playing();
        self.cancel_pending();
        if was_running {
            debug!("playback: paused position={}", self.position);
        }
        was_running
    }

    /// Decelerate to a stop over the configured ramp, or stop immediately
    /// when no ramp is configured.
    pub fn request_pause(&mut self) -> bool {
        let Playback::Running { due_ms, ramp } = self.playback else {
            return false;
        };
        let Some(ramp_config) = self.config.ramp else {
            return self.pause();
        };

        let down = match ramp {
            Some(Ramp {
                phase: RampPhase::Down,
                ..
            }) => return false,
            Some(up) => up.reversed(&ramp_config),
            None => Ramp::down(),
        };
        debug!(
            "playback: ramp-down requested position={} step={}",
            self.position, down.step
        );
        self.playback = Playback::Running {
            due_ms,
            ramp: Some(down),
        };
        true
    }

    pub fn toggle_play(&mut self, now_ms: u64) -> bool {
        match self.state() {
            PlaybackState::Stopped | PlaybackState::RampingDown => self.play(now_ms),
            PlaybackState::Playing | PlaybackState::RampingUp => self.request_pause(),
        }
    }

    /// Fire the pending advance when its deadline has passed.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        let Playback::Running { due_ms, ramp } = self.playback else {
            return TickResult::Idle;
        };
        if now_ms < due_ms {
            return TickResult::Idle;
        }

        self.advance(now_ms, ramp)
    }

    fn advance(&mut self, now_ms: u64, ramp: Option<Ramp>) -> TickResult {
        self.position = self.position.saturating_add(1).min(self.tokens.len());
        self.words_since_drain = self.words_since_drain.saturating_add(1);

        if self.is_exhausted() {
            self.playback = Playback::Stopped;
            debug!("playback: completed total={}", self.tokens.len());
            self.observer.on_complete();
            return TickResult::Completed;
        }

        let next_ramp = match ramp {
            None => None,
            Some(mut ramp) => {
                let finished = self
                    .config
                    .ramp
                    .is_none_or(|ramp_config| ramp.step_forward(&ramp_config));
                match (ramp.phase, finished) {
                    (_, false) => Some(ramp),
                    (RampPhase::Up, true) => {
                        debug!("playback: ramp-up done position={}", self.position);
                        None
                    }
                    (RampPhase::Down, true) => {
                        self.playback = Playback::Stopped;
                        debug!("playback: ramp-down stopped position={}", self.position);
                        self.emit_current(true);
                        self.observer.on_ramp_stopped(self.position);
                        return TickResult::RampStopped;
                    }
                }
            }
        };

        self.run_current(now_ms, next_ramp);
        TickResult::Advanced
    }

    /// Emit the current token and schedule the advance past it.
    fn run_current(&mut self, now_ms: u64, ramp: Option<Ramp>) {
        self.emit_current(true);
        let delay_ms = self.current_delay_ms(ramp);
        self.playback = Playback::Running {
            due_ms: now_ms.saturating_add(u64::from(delay_ms)),
            ramp,
        };
    }

    fn current_delay_ms(&mut self, ramp: Option<Ramp>) -> u32 {
        let Some(token) = self.tokens.get(self.position) else {
            return 0;
        };

        if let Some(long_pause_ms) = self.cadence.observe(token, &self.config) {
            debug!(
                "pacing: paragraph cadence reached, long pause {}ms",
                long_pause_ms
            );
            // The forced pause is absolute; ramps only scale reading delays.
            return long_pause_ms;
        }

        let delay_ms = token_delay_ms(token, &self.config);
        match (ramp, self.config.ramp) {
            (Some(ramp), Some(ramp_config)) => ramp.apply(delay_ms, &ramp_config),
            _ => delay_ms,
        }
    }

    fn cancel_pending(&mut self) {
        self.playback = Playback::Stopped;
    }
}
