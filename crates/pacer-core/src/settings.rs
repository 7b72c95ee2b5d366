//! Reading position persistence abstraction.

/// Reading location used to resume a document later.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ResumeState {
    pub position: usize,
    pub total: usize,
}

impl ResumeState {
    pub const fn new(position: usize, total: usize) -> Self {
        Self { position, total }
    }

    /// Stored position, or `None` when it was saved for a different sequence
    /// length and can no longer be trusted.
    pub fn position_for(&self, total: usize) -> Option<usize> {
        (self.total == total).then_some(self.position)
    }
}

/// Abstract per-document progress backend, keyed by document identity.
pub trait ProgressStore {
    type Error;

    fn load(&mut self, document_key: &str) -> Result<Option<ResumeState>, Self::Error>;
    fn save(&mut self, document_key: &str, state: &ResumeState) -> Result<(), Self::Error>;
}
