//! Pacing configuration and per-token display delays.
//!
//! All factors are stored in per-mille (`1000` = 1.0x) so delay math stays in
//! integers and identical inputs always produce identical durations.

use crate::{content::is_paragraph_break, text_policy::clean_len};

pub const DEFAULT_WPM: u16 = 600;
pub const MIN_WPM: u16 = 50;
pub const MAX_WPM: u16 = 1_500;
pub const WPM_STEP: u16 = 25;
pub const DEFAULT_LONG_PAUSE_MS: u32 = 3_000;
pub const PERMILLE: u32 = 1_000;

const MS_PER_MINUTE: u64 = 60_000;
const SYMBOL_CHARS: [char; 5] = [',', ';', ':', '!', '?'];

/// Clean-length bucket used to pick a length factor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LengthBucket {
    /// Up to 5 letters.
    Short,
    /// 6 to 8 letters.
    Medium,
    /// 9 to 12 letters.
    Long,
    /// 13 to 16 letters.
    Extra,
    /// 17 letters or more.
    Huge,
}

impl LengthBucket {
    pub fn from_clean_len(clean_len: usize) -> Self {
        match clean_len {
            0..=5 => Self::Short,
            6..=8 => Self::Medium,
            9..=12 => Self::Long,
            13..=16 => Self::Extra,
            _ => Self::Huge,
        }
    }
}

/// Multiplicative pacing factor per length bucket, in per-mille.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LengthFactors {
    pub short: u16,
    pub medium: u16,
    pub long: u16,
    pub extra: u16,
    pub huge: u16,
}

impl Default for LengthFactors {
    fn default() -> Self {
        Self {
            short: 1_000,
            medium: 1_200,
            long: 1_400,
            extra: 1_700,
            huge: 2_000,
        }
    }
}

impl LengthFactors {
    pub fn factor(&self, bucket: LengthBucket) -> u16 {
        match bucket {
            LengthBucket::Short => self.short,
            LengthBucket::Medium => self.medium,
            LengthBucket::Long => self.long,
            LengthBucket::Extra => self.extra,
            LengthBucket::Huge => self.huge,
        }
    }

    pub fn is_monotonic(&self) -> bool {
        let ordered = [self.short, self.medium, self.long, self.extra, self.huge];
        self.short > 0 && ordered.windows(2).all(|pair| pair[0] <= pair[1])
    }
}

/// Penalty per punctuation class. The unit depends on the policy that owns
/// the table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PunctuationTable {
    pub symbols: u32,
    pub period: u32,
    pub paragraph: u32,
}

impl PunctuationTable {
    fn sum(&self, classes: PunctuationClasses) -> u32 {
        let mut total = 0u32;
        if classes.symbols {
            total = total.saturating_add(self.symbols);
        }
        if classes.period {
            total = total.saturating_add(self.period);
        }
        if classes.paragraph {
            total = total.saturating_add(self.paragraph);
        }
        total
    }
}

/// How punctuation pauses accumulate into a token's delay.
///
/// One policy covers the whole table, so the two forms never mix.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PunctuationDelays {
    /// Flat milliseconds added after length scaling. Pauses stay constant
    /// regardless of reading speed.
    Additive(PunctuationTable),
    /// Per-mille fractions added to the length factor. Pauses scale with
    /// reading speed.
    Proportional(PunctuationTable),
}

impl Default for PunctuationDelays {
    fn default() -> Self {
        Self::Additive(PunctuationTable {
            symbols: 150,
            period: 220,
            paragraph: 300,
        })
    }
}

impl PunctuationDelays {
    pub fn proportional_default() -> Self {
        Self::Proportional(PunctuationTable {
            symbols: 500,
            period: 1_000,
            paragraph: 1_500,
        })
    }
}

/// Punctuation classes present in a token. Classes are cumulative.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PunctuationClasses {
    pub symbols: bool,
    pub period: bool,
    pub paragraph: bool,
}

pub fn punctuation_classes(token: &str, paragraph_pause_enabled: bool) -> PunctuationClasses {
    PunctuationClasses {
        symbols: token.contains(SYMBOL_CHARS),
        period: token.contains('.'),
        paragraph: paragraph_pause_enabled && is_paragraph_break(token),
    }
}

/// Speed ramp applied when playback starts from a full stop or winds down.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RampConfig {
    /// Number of advances the ramp spans.
    pub steps: u8,
    /// Delay multiplier at the slow end of the ramp, in per-mille.
    pub max_factor: u16,
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            steps: 12,
            max_factor: 3_000,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("reading rate must be a positive number of words per minute, got {wpm}")]
    InvalidRate { wpm: u16 },
    #[error("length factors must be positive and non-decreasing from short to huge words")]
    NonMonotonicLengthFactors,
    #[error("invalid ramp: {reason}")]
    InvalidRamp { reason: &'static str },
}

/// Engine-owned pacing parameters.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PacingConfig {
    pub wpm: u16,
    pub length_factors: LengthFactors,
    pub punctuation: PunctuationDelays,
    /// Force a long pause every N paragraph breaks; `0` disables it.
    pub paragraph_break_every: u16,
    pub paragraph_pause_enabled: bool,
    pub long_pause_ms: u32,
    pub ramp: Option<RampConfig>,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            wpm: DEFAULT_WPM,
            length_factors: LengthFactors::default(),
            punctuation: PunctuationDelays::default(),
            paragraph_break_every: 0,
            paragraph_pause_enabled: true,
            long_pause_ms: DEFAULT_LONG_PAUSE_MS,
            ramp: None,
        }
    }
}

impl PacingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wpm == 0 {
            return Err(ConfigError::InvalidRate { wpm: self.wpm });
        }
        if !self.length_factors.is_monotonic() {
            return Err(ConfigError::NonMonotonicLengthFactors);
        }
        if let Some(ramp) = self.ramp {
            if ramp.steps == 0 {
                return Err(ConfigError::InvalidRamp {
                    reason: "ramp needs at least one step",
                });
            }
            if u32::from(ramp.max_factor) < PERMILLE {
                return Err(ConfigError::InvalidRamp {
                    reason: "ramp factor must not speed playback up",
                });
            }
        }
        Ok(())
    }

    /// Apply `patch` on top of `self`, returning the merged configuration
    /// only when the result is valid.
    pub fn merged(&self, patch: &ConfigPatch) -> Result<Self, ConfigError> {
        let merged = Self {
            wpm: patch.wpm.unwrap_or(self.wpm),
            length_factors: patch.length_factors.unwrap_or(self.length_factors),
            punctuation: patch.punctuation.unwrap_or(self.punctuation),
            paragraph_break_every: patch
                .paragraph_break_every
                .unwrap_or(self.paragraph_break_every),
            paragraph_pause_enabled: patch
                .paragraph_pause_enabled
                .unwrap_or(self.paragraph_pause_enabled),
            long_pause_ms: patch.long_pause_ms.unwrap_or(self.long_pause_ms),
            ramp: patch.ramp.unwrap_or(self.ramp),
        };
        merged.validate()?;
        Ok(merged)
    }

    /// Milliseconds per word at the configured rate, before any factor.
    pub fn base_delay_ms(&self) -> u32 {
        scaled_ms(self.wpm, PERMILLE)
    }
}

/// Partial configuration update. `None` fields keep their current value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ConfigPatch {
    pub wpm: Option<u16>,
    pub length_factors: Option<LengthFactors>,
    pub punctuation: Option<PunctuationDelays>,
    pub paragraph_break_every: Option<u16>,
    pub paragraph_pause_enabled: Option<bool>,
    pub long_pause_ms: Option<u32>,
    pub ramp: Option<Option<RampConfig>>,
}

impl ConfigPatch {
    pub const fn new() -> Self {
        Self {
            wpm: None,
            length_factors: None,
            punctuation: None,
            paragraph_break_every: None,
            paragraph_pause_enabled: None,
            long_pause_ms: None,
            ramp: None,
        }
    }

    pub const fn with_wpm(mut self, wpm: u16) -> Self {
        self.wpm = Some(wpm);
        self
    }

    pub const fn with_length_factors(mut self, factors: LengthFactors) -> Self {
        self.length_factors = Some(factors);
        self
    }

    pub const fn with_punctuation(mut self, punctuation: PunctuationDelays) -> Self {
        self.punctuation = Some(punctuation);
        self
    }

    pub const fn with_paragraph_break_every(mut self, every: u16) -> Self {
        self.paragraph_break_every = Some(every);
        self
    }

    pub const fn with_paragraph_pause(mut self, enabled: bool) -> Self {
        self.paragraph_pause_enabled = Some(enabled);
        self
    }

    pub const fn with_long_pause_ms(mut self, long_pause_ms: u32) -> Self {
        self.long_pause_ms = Some(long_pause_ms);
        self
    }

    pub const fn with_ramp(mut self, ramp: Option<RampConfig>) -> Self {
        self.ramp = Some(ramp);
        self
    }
}

/// Display duration for `token` from length and punctuation alone.
///
/// Paragraph cadence and ramping are stateful and layered on top by the
/// engine.
pub fn token_delay_ms(token: &str, config: &PacingConfig) -> u32 {
    let bucket = LengthBucket::from_clean_len(clean_len(token));
    let length_factor = u32::from(config.length_factors.factor(bucket));
    let classes = punctuation_classes(token, config.paragraph_pause_enabled);

    match config.punctuation {
        PunctuationDelays::Additive(table) => {
            scaled_ms(config.wpm, length_factor).saturating_add(table.sum(classes))
        }
        PunctuationDelays::Proportional(table) => {
            scaled_ms(config.wpm, length_factor.saturating_add(table.sum(classes)))
        }
    }
}

/// `60_000 / wpm * factor / 1000`, rounded to the nearest millisecond.
fn scaled_ms(wpm: u16, factor_permille: u32) -> u32 {
    let denominator = u64::from(wpm.max(1)) * u64::from(PERMILLE);
    let numerator = MS_PER_MINUTE * u64::from(factor_permille);
    let rounded = (numerator + denominator / 2) / denominator;
    rounded.min(u64::from(u32::MAX)) as u32
}

/// Counts paragraph breaks and forces the long pause every N of them.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ParagraphCadence {
    count: u16,
}

impl ParagraphCadence {
    pub const fn new() -> Self {
        Self { count: 0 }
    }

    pub fn count(&self) -> u16 {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Record `token` as displayed and return the overriding delay when it
    /// completes a cadence.
    pub fn observe(&mut self, token: &str, config: &PacingConfig) -> Option<u32> {
        if config.paragraph_break_every == 0 || !is_paragraph_break(token) {
            return None;
        }

        self.count = self.count.saturating_add(1);
        if self.count >= config.paragraph_break_every {
            self.count = 0;
            return Some(config.long_pause_ms);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PARAGRAPH_BREAK;

    fn config_at(wpm: u16) -> PacingConfig {
        PacingConfig {
            wpm,
            ..PacingConfig::default()
        }
    }

    #[test]
    fn base_delay_follows_rate() {
        assert_eq!(config_at(600).base_delay_ms(), 100);
        assert_eq!(config_at(300).base_delay_ms(), 200);
        assert_eq!(config_at(230).base_delay_ms(), 261);
    }

    #[test]
    fn extra_bucket_scales_without_punctuation() {
        let config = config_at(600)
            .merged(&ConfigPatch::new().with_length_factors(LengthFactors {
                short: 1_000,
                medium: 1_100,
                long: 1_200,
                extra: 1_350,
                huge: 1_500,
            }))
            .unwrap();
        assert_eq!(token_delay_ms("extraordinarily", &config), 135);
    }

    #[test]
    fn delay_only_changes_at_bucket_boundaries() {
        let config = config_at(600);
        let mut previous = None;
        let mut word = String::new();
        for len in 1..=24usize {
            word.push('a');
            let delay = token_delay_ms(&word, &config);
            if let Some((prev_len, prev_delay)) = previous {
                let same_bucket = LengthBucket::from_clean_len(prev_len)
                    == LengthBucket::from_clean_len(len);
                if same_bucket {
                    assert_eq!(delay, prev_delay, "len {len}");
                } else {
                    assert!(delay > prev_delay, "len {len}");
                }
            }
            previous = Some((len, delay));
        }
    }

    #[test]
    fn additive_punctuation_accumulates_by_class() {
        let config = config_at(600);
        assert_eq!(token_delay_ms("Hello", &config), 100);
        assert_eq!(token_delay_ms("Hello,", &config), 250);
        assert_eq!(token_delay_ms("world.", &config), 320);
        assert_eq!(token_delay_ms("Really?!", &config), 120 + 150);
        assert_eq!(token_delay_ms("etc.,", &config), 100 + 150 + 220);
        assert_eq!(token_delay_ms(PARAGRAPH_BREAK, &config), 400);
    }

    #[test]
    fn additive_pauses_do_not_scale_with_speed() {
        let slow = config_at(300);
        let fast = config_at(1_200);
        assert_eq!(token_delay_ms("end.", &slow) - slow.base_delay_ms(), 220);
        assert_eq!(token_delay_ms("end.", &fast) - fast.base_delay_ms(), 220);
    }

    #[test]
    fn proportional_pauses_scale_with_speed() {
        let patch = ConfigPatch::new().with_punctuation(PunctuationDelays::proportional_default());
        let slow = config_at(300).merged(&patch).unwrap();
        let fast = config_at(600).merged(&patch).unwrap();
        assert_eq!(token_delay_ms("end.", &slow), 400);
        assert_eq!(token_delay_ms("end.", &fast), 200);
        assert_eq!(token_delay_ms("so,", &fast), 150);
    }

    #[test]
    fn disabled_paragraph_pause_keeps_base_delay() {
        let config = config_at(600)
            .merged(&ConfigPatch::new().with_paragraph_pause(false))
            .unwrap();
        assert_eq!(token_delay_ms(PARAGRAPH_BREAK, &config), 100);
    }

    #[test]
    fn zero_rate_is_rejected_and_keeps_previous() {
        let config = config_at(450);
        let err = config
            .merged(&ConfigPatch::new().with_wpm(0).with_paragraph_break_every(2))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidRate { wpm: 0 });
        assert_eq!(config.wpm, 450);
        assert_eq!(config.paragraph_break_every, 0);
    }

    #[test]
    fn length_factors_must_not_decrease() {
        let err = PacingConfig::default()
            .merged(&ConfigPatch::new().with_length_factors(LengthFactors {
                long: 900,
                ..LengthFactors::default()
            }))
            .unwrap_err();
        assert_eq!(err, ConfigError::NonMonotonicLengthFactors);
    }

    #[test]
    fn ramp_must_slow_down() {
        let err = PacingConfig::default()
            .merged(&ConfigPatch::new().with_ramp(Some(RampConfig {
                steps: 4,
                max_factor: 500,
            })))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRamp { .. }));
    }

    #[test]
    fn patch_merges_field_by_field() {
        let config = PacingConfig::default()
            .merged(&ConfigPatch::new().with_wpm(300))
            .unwrap()
            .merged(&ConfigPatch::new().with_paragraph_break_every(3))
            .unwrap();
        assert_eq!(config.wpm, 300);
        assert_eq!(config.paragraph_break_every, 3);
        assert_eq!(config.length_factors, LengthFactors::default());
    }

    #[test]
    fn cadence_overrides_every_nth_break_and_resets() {
        let config = config_at(600)
            .merged(&ConfigPatch::new().with_paragraph_break_every(3))
            .unwrap();
        let mut cadence = ParagraphCadence::new();

        assert_eq!(cadence.observe(PARAGRAPH_BREAK, &config), None);
        assert_eq!(cadence.observe("word", &config), None);
        assert_eq!(cadence.observe(PARAGRAPH_BREAK, &config), None);
        assert_eq!(cadence.count(), 2);
        assert_eq!(
            cadence.observe(PARAGRAPH_BREAK, &config),
            Some(DEFAULT_LONG_PAUSE_MS)
        );
        assert_eq!(cadence.count(), 0);
        assert_eq!(cadence.observe(PARAGRAPH_BREAK, &config), None);
        assert_eq!(cadence.count(), 1);
    }

    #[test]
    fn cadence_disabled_never_counts() {
        let config = PacingConfig::default();
        let mut cadence = ParagraphCadence::new();
        for _ in 0..10 {
            assert_eq!(cadence.observe(PARAGRAPH_BREAK, &config), None);
        }
        assert_eq!(cadence.count(), 0);
    }
}
