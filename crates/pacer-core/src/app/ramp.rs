//! Speed ramp layered over computed delays.

use crate::pacing::{PERMILLE, RampConfig};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum RampPhase {
    Up,
    Down,
}

/// Position within a ramp. Step `0` is the start of the phase.
///
/// Ramp-up slows `steps` words starting at the max factor. Ramp-down slows
/// `steps` words ending at the max factor, then stops on the next advance.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Ramp {
    pub(super) phase: RampPhase,
    pub(super) step: u16,
}

impl Ramp {
    pub(super) const fn up() -> Self {
        Self {
            phase: RampPhase::Up,
            step: 0,
        }
    }

    pub(super) const fn down() -> Self {
        Self {
            phase: RampPhase::Down,
            step: 0,
        }
    }

    /// Ramp-down that continues from the current multiplier of a ramp-up.
    pub(super) fn reversed(self, config: &RampConfig) -> Self {
        match self.phase {
            RampPhase::Up => Self {
                phase: RampPhase::Down,
                step: u16::from(config.steps).saturating_sub(self.step),
            },
            RampPhase::Down => self,
        }
    }

    /// Delay multiplier for the current step, in per-mille.
    pub(super) fn factor(&self, config: &RampConfig) -> u32 {
        let max = u32::from(config.max_factor).max(PERMILLE);
        let span = max - PERMILLE;
        let steps = u32::from(config.steps.max(1));
        let step = u32::from(self.step).min(steps);

        match self.phase {
            RampPhase::Up => max - span * step / steps,
            RampPhase::Down => PERMILLE + span * step / steps,
        }
    }

    pub(super) fn apply(&self, delay_ms: u32, config: &RampConfig) -> u32 {
        let scaled = (u64::from(delay_ms) * u64::from(self.factor(config))
            + u64::from(PERMILLE) / 2)
            / u64::from(PERMILLE);
        scaled.min(u64::from(u32::MAX)) as u32
    }

    /// Move one step forward; `true` once the phase has run its course.
    pub(super) fn step_forward(&mut self, config: &RampConfig) -> bool {
        self.step = self.step.saturating_add(1);
        let steps = u16::from(config.steps);
        match self.phase {
            RampPhase::Up => self.step >= steps,
            RampPhase::Down => self.step > steps,
        }
    }
}
