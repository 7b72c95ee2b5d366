impl<O> ReaderEngine<O>
where
    O: PlaybackObserver,
{
    /// Replace the sequence and show its first frame without playing.
    pub fn load(&mut self, tokens: Vec<String>, options: LoadOptions) {
        self.cancel_pending();
        self.tokens = tokens;
        self.cadence.reset();
        self.position = clamp_position(options.start, self.tokens.len());
        debug!(
            "sequence: loaded tokens={} start={} requested_start={}",
            self.tokens.len(),
            self.position,
            options.start
        );
        self.emit_current(options.report_progress);
    }

    /// Tokenize `document` and load the result.
    ///
    /// On failure the previous sequence and playback state are untouched.
    pub fn load_document<T>(
        &mut self,
        tokenizer: &T,
        document: &[u8],
        options: LoadOptions,
    ) -> Result<usize, LoadError>
    where
        T: Tokenizer + ?Sized,
    {
        let tokens = tokenizer.tokenize(document)?;
        let count = tokens.len();
        self.load(tokens, options);
        Ok(count)
    }

    pub fn restart(&mut self) {
        self.cancel_pending();
        self.position = 0;
        self.cadence.reset();
        debug!("navigation: restart");
        self.emit_current(true);
    }

    pub fn prev(&mut self) {
        self.cancel_pending();
        if self.tokens.is_empty() {
            return;
        }
        self.position = clamp_position(self.position.saturating_sub(1), self.tokens.len());
        self.emit_current(true);
    }

    pub fn next(&mut self) {
        self.cancel_pending();
        if self.tokens.is_empty() {
            return;
        }
        self.position = clamp_position(self.position.saturating_add(1), self.tokens.len());
        self.emit_current(true);
    }

    pub fn seek(&mut self, position: usize) {
        self.cancel_pending();
        if self.tokens.is_empty() {
            return;
        }
        self.position = clamp_position(position, self.tokens.len());
        debug!(
            "navigation: seek requested={} position={}",
            position, self.position
        );
        self.emit_current(true);
    }
}
