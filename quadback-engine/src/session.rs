use quadback_core::{Modality, ResponseEvent, SessionStats, Trial};
use quadback_timing::Clock;
use rand::Rng;

use crate::config::GameConfig;
use crate::generator::generate;
use crate::scoring::{attach_response, compute_stats};

/// Session lifecycle. The generator never sees these states; they belong
/// to the driver that serializes ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Running,
    Paused,
    Finished,
}

/// Serializing driver around the trial generator. Owns the append-only
/// history, the random source and the clock, and hands out exactly one
/// trial per tick while running. The configuration is taken at
/// construction and never changes, which is what makes aggregating stats
/// against the live config sound.
pub struct Session<C: Clock, R: Rng> {
    config: GameConfig,
    clock: C,
    rng: R,
    status: SessionStatus,
    history: Vec<Trial>,
}

impl<C: Clock, R: Rng> Session<C, R> {
    pub fn new(config: GameConfig, clock: C, rng: R) -> Self {
        Self {
            config,
            clock,
            rng,
            status: SessionStatus::Idle,
            history: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn history(&self) -> &[Trial] {
        &self.history
    }

    /// The most recent trial, the only one still open for responses.
    pub fn current(&self) -> Option<&Trial> {
        self.history.last()
    }

    pub fn is_finished(&self) -> bool {
        self.status == SessionStatus::Finished
    }

    /// Discards any previous history and generates trial 0.
    pub fn start(&mut self) -> &Trial {
        self.history.clear();
        self.status = SessionStatus::Running;
        log::info!(
            "session started: n={}, {} trials, p={}",
            self.config.n,
            self.config.total_trials,
            self.config.match_probability
        );
        self.append_trial()
    }

    /// Appends the next trial, or flips to finished once the configured
    /// session length is reached. No-op unless running.
    pub fn tick(&mut self) -> Option<&Trial> {
        if self.status != SessionStatus::Running {
            return None;
        }
        if self.history.len() >= self.config.total_trials {
            self.status = SessionStatus::Finished;
            log::info!("session finished after {} trials", self.history.len());
            return None;
        }
        Some(self.append_trial())
    }

    fn append_trial(&mut self) -> &Trial {
        let t = self.history.len();
        let trial = generate(t, &self.config, &self.history, &mut self.rng, &self.clock);
        log::debug!("trial {t} started at {} ms", trial.started_at_ms);
        self.history.push(trial);
        &self.history[t]
    }

    /// Running ⇄ paused; anything else is left alone.
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            SessionStatus::Running => SessionStatus::Paused,
            SessionStatus::Paused => SessionStatus::Running,
            other => other,
        };
    }

    /// Explicit reset back to idle, discarding history.
    pub fn reset(&mut self) {
        self.history.clear();
        self.status = SessionStatus::Idle;
    }

    /// Resolves a pressed key against the match bindings and attaches a
    /// response to the latest trial. Returns the modality that was
    /// scored; `None` for unbound keys, duplicate responses, or when the
    /// session is not running.
    pub fn handle_key(&mut self, key: char) -> Option<Modality> {
        if self.status != SessionStatus::Running {
            return None;
        }
        let modality = self.config.resolve_match_key(key)?;
        let now_ms = self.clock.now_ms();
        let trial = self.history.last_mut()?;
        let correct = trial.truth_of(modality).unwrap_or(false);
        let response = ResponseEvent {
            key,
            time_ms: now_ms.saturating_sub(trial.started_at_ms),
            is_match: true,
            correct,
            created_at_ms: now_ms,
        };
        attach_response(trial, modality, response).then_some(modality)
    }

    pub fn stats(&self) -> SessionStats {
        compute_stats(&self.history, &self.config)
    }
}
