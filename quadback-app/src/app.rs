use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use quadback_core::Modality;
use quadback_engine::{Session, SessionStatus};
use quadback_timing::{Clock, MonotonicClock};
use rand::rngs::ThreadRng;

/// Headless session runner: drives one full session at the configured
/// cadence and prints the trial stream and final accuracy.
pub struct App {
    session: Session<MonotonicClock, ThreadRng>,
    clock: MonotonicClock,
    config_path: PathBuf,
    /// Play a perfect participant: press every bound key whose modality
    /// is a true match on the current trial.
    respond_to_matches: bool,
    /// Skip inter-trial sleeps; useful for smoke runs.
    fast: bool,
}

impl App {
    pub fn new(config_path: PathBuf, respond_to_matches: bool, fast: bool) -> Self {
        let config = quadback_store::load_config(&config_path);
        let clock = MonotonicClock::new();
        let session = Session::new(config, clock.clone(), rand::rng());
        Self {
            session,
            clock,
            config_path,
            respond_to_matches,
            fast,
        }
    }

    pub fn run(mut self) -> Result<()> {
        let config = self.session.config().clone();
        println!("=== QUAD N-BACK SESSION ===");
        println!(
            "n = {}, trials = {}, grid = {}×{}, match p = {}",
            config.n, config.total_trials, config.grid_size, config.grid_size,
            config.match_probability
        );
        let enabled: Vec<_> = Modality::ALL
            .into_iter()
            .filter(|&m| config.enabled(m))
            .map(|m| format!("{m} [{}]", config.modalities.get(m).match_key))
            .collect();
        println!("modalities: {}\n", enabled.join(", "));

        self.session.start();
        loop {
            if self.respond_to_matches {
                self.answer_matches();
            }
            self.report_current();
            if !self.fast {
                self.clock.sleep(Duration::from_millis(config.tick_ms));
            }
            if self.session.tick().is_none() {
                break;
            }
        }
        debug_assert_eq!(self.session.status(), SessionStatus::Finished);

        let stats = self.session.stats();
        println!("\n--- results ---");
        for modality in Modality::ALL {
            if !config.enabled(modality) {
                continue;
            }
            let tally = stats.per_modality.get(modality);
            println!(
                "{modality:>9}: {}/{} correct",
                tally.correct, tally.attempts
            );
        }
        println!(
            "  overall: {}/{} ({:.1}%)",
            stats.correct,
            stats.attempts,
            stats.accuracy() * 100.0
        );
        println!("\n{}", serde_json::to_string_pretty(&stats)?);

        quadback_store::save_config(&self.config_path, &config)?;
        Ok(())
    }

    fn answer_matches(&mut self) {
        let Some(trial) = self.session.current() else {
            return;
        };
        let keys: Vec<char> = Modality::ALL
            .into_iter()
            .filter(|&m| trial.truth_of(m) == Some(true))
            .map(|m| self.session.config().modalities.get(m).match_key)
            .collect();
        for key in keys {
            self.session.handle_key(key);
        }
    }

    fn report_current(&self) {
        let Some(trial) = self.session.current() else {
            return;
        };
        let truths: Vec<_> = Modality::ALL
            .into_iter()
            .filter(|&m| trial.truth_of(m) == Some(true))
            .map(|m| m.name())
            .collect();
        println!(
            "t={:>3}  pos={}  color={}  picture={}  sound={}  match: {}",
            trial.t,
            trial.stimulus.position.unwrap_or_default(),
            trial.stimulus.color.unwrap_or("-"),
            trial.stimulus.picture.as_deref().unwrap_or("-"),
            trial.stimulus.sound.unwrap_or("-"),
            if truths.is_empty() {
                "-".to_string()
            } else {
                truths.join("+")
            }
        );
    }
}
