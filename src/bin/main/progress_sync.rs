use log::{debug, warn};
use pacer_core::settings::{ProgressStore, ResumeState};

use super::PROGRESS_SAVE_DEBOUNCE_MS;

/// Debounces progress writes so rapid word advances do not hit the disk.
pub(super) struct ProgressSyncState {
    document_key: String,
    last_saved: Option<ResumeState>,
    pending: Option<(ResumeState, u64)>,
}

impl ProgressSyncState {
    pub(super) fn new(document_key: String, initial: Option<ResumeState>) -> Self {
        Self {
            document_key,
            last_saved: initial,
            pending: None,
        }
    }

    pub(super) fn track_current(&mut self, current: ResumeState, now_ms: u64) {
        if Some(current) == self.last_saved {
            self.pending = None;
            return;
        }

        match self.pending.as_mut() {
            Some((pending, _)) => {
                // Keep the first change time so steady reading still saves periodically.
                *pending = current;
            }
            None => {
                self.pending = Some((current, now_ms));
            }
        }
    }

    pub(super) fn flush_if_due<S>(&mut self, store: &mut S, now_ms: u64)
    where
        S: ProgressStore,
        S::Error: core::fmt::Display,
    {
        let Some((_, changed_at_ms)) = self.pending else {
            return;
        };

        if now_ms.saturating_sub(changed_at_ms) < PROGRESS_SAVE_DEBOUNCE_MS {
            return;
        }
        self.flush_now(store, now_ms);
    }

    pub(super) fn flush_now<S>(&mut self, store: &mut S, now_ms: u64)
    where
        S: ProgressStore,
        S::Error: core::fmt::Display,
    {
        let Some((candidate, _)) = self.pending else {
            return;
        };

        match store.save(&self.document_key, &candidate) {
            Ok(()) => {
                debug!(
                    "progress: saved {} at {}/{}",
                    self.document_key, candidate.position, candidate.total
                );
                self.last_saved = Some(candidate);
                self.pending = None;
            }
            Err(err) => {
                warn!("progress: save failed for {}: {}", self.document_key, err);
                self.pending = Some((candidate, now_ms));
            }
        }
    }
}
