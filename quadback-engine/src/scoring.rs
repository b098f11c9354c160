use quadback_core::{Modality, ResponseEvent, SessionStats, Trial};

use crate::config::GameConfig;

/// Records a response for one modality on a trial. First input wins:
/// attaching to an already-answered modality is a silent no-op. Returns
/// whether the response was recorded.
pub fn attach_response(trial: &mut Trial, modality: Modality, response: ResponseEvent) -> bool {
    let slot = trial.responses.get_mut(modality);
    if slot.is_some() {
        log::debug!("trial {}: duplicate {modality} response ignored", trial.t);
        return false;
    }
    *slot = Some(response);
    true
}

/// Aggregates attempts and correct counts over the whole history, per
/// modality and overall. Pure and cheap enough to recompute on demand.
///
/// Filtering uses the live configuration's enabled flags rather than
/// per-trial snapshots; the two agree because configuration is frozen for
/// the duration of a session.
pub fn compute_stats(history: &[Trial], config: &GameConfig) -> SessionStats {
    let mut stats = SessionStats::default();
    for trial in history {
        for modality in Modality::ALL {
            if !config.enabled(modality) || trial.truth_of(modality).is_none() {
                continue;
            }
            let tally = stats.per_modality.get_mut(modality);
            tally.attempts += 1;
            stats.attempts += 1;
            if trial
                .responses
                .get(modality)
                .as_ref()
                .is_some_and(|r| r.correct)
            {
                tally.correct += 1;
                stats.correct += 1;
            }
        }
    }
    stats
}
