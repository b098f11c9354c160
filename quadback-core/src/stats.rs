use serde::{Deserialize, Serialize};

use crate::PerModality;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub attempts: u32,
    pub correct: u32,
}

/// Aggregate session accuracy, derived on demand from history plus the
/// live configuration. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub attempts: u32,
    pub correct: u32,
    pub per_modality: PerModality<Tally>,
}

impl SessionStats {
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.attempts)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_is_zero_without_attempts() {
        assert_eq!(SessionStats::default().accuracy(), 0.0);
    }

    #[test]
    fn accuracy_is_the_correct_ratio() {
        let stats = SessionStats {
            attempts: 8,
            correct: 6,
            per_modality: PerModality::default(),
        };
        assert!((stats.accuracy() - 0.75).abs() < f64::EPSILON);
    }
}
