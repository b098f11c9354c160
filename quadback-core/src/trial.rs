use crate::{Modality, PerModality, Stimulus};

/// A single key press, scored against the trial's truth at the moment it
/// was attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEvent {
    pub key: char,
    /// Latency relative to the trial's creation timestamp.
    pub time_ms: u64,
    /// Match keys are the only bound inputs, so this is always `true`
    /// today; kept for symmetry with a future no-match binding.
    pub is_match: bool,
    pub correct: bool,
    pub created_at_ms: u64,
}

/// Ground truth per modality, present only for enabled modalities.
pub type TruthMap = PerModality<Option<bool>>;
/// At most one response per modality, recorded lazily after creation.
pub type ResponseMap = PerModality<Option<ResponseEvent>>;

/// One tick of a session. Immutable once constructed except for the
/// response map; truth is computed at creation and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trial {
    /// Sequence index, 0-based and contiguous.
    pub t: usize,
    pub started_at_ms: u64,
    pub stimulus: Stimulus,
    pub truth: TruthMap,
    pub responses: ResponseMap,
}

impl Trial {
    pub fn truth_of(&self, modality: Modality) -> Option<bool> {
        *self.truth.get(modality)
    }

    pub fn has_response(&self, modality: Modality) -> bool {
        self.responses.get(modality).is_some()
    }
}
