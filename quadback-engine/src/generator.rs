use quadback_core::{
    COLOR_NAMES, ImageColorMode, Modality, NEUTRAL_COLOR, PerModality, SOUND_LABEL, Stimulus,
    Trial, TruthMap, embedded_color, picture_asset,
};
use quadback_timing::Clock;
use rand::Rng;

use crate::config::GameConfig;

/// Produces the trial at index `t` from the trials before it.
///
/// Randomness and time come in as capabilities; everything else is a
/// function of `(t, config, history)`. The caller owns the history and
/// must pass exactly the trials `0..t`.
pub fn generate<R: Rng, C: Clock>(
    t: usize,
    config: &GameConfig,
    history: &[Trial],
    rng: &mut R,
    clock: &C,
) -> Trial {
    debug_assert_eq!(history.len(), t, "history must cover exactly 0..t");

    let prev = history.last().map(|trial| &trial.stimulus);
    let lagged = t
        .checked_sub(config.n)
        .and_then(|i| history.get(i))
        .map(|trial| &trial.stimulus);

    let mut stimulus = Stimulus::default();

    // Position: when the modality is disabled the dot still moves every
    // tick, but never lands on the previous cell.
    let cells = config.cell_count();
    let prev_position = prev.and_then(|s| s.position);
    let position_candidate = if draws_forced_match(rng, config, t, Modality::Position) {
        lagged.and_then(|s| s.position)
    } else {
        None
    };
    stimulus.position = Some(if config.enabled(Modality::Position) {
        position_candidate.unwrap_or_else(|| next_position(rng, cells, prev_position, false))
    } else {
        next_position(rng, cells, prev_position, true)
    });

    // Picture and color are coupled: a reused asset dictates the
    // displayed color, and the asset color mode follows the color
    // modality's enabled flag rather than the configured inventory mode.
    let color_enabled = config.enabled(Modality::Color);
    let color_mode = if color_enabled {
        ImageColorMode::Colour
    } else {
        ImageColorMode::NoColour
    };

    let color_candidate = if draws_forced_match(rng, config, t, Modality::Color) {
        lagged.and_then(|s| s.color)
    } else {
        None
    };
    let picture_candidate = if draws_forced_match(rng, config, t, Modality::Picture) {
        lagged.and_then(|s| s.picture.clone())
    } else {
        None
    };

    if config.enabled(Modality::Picture) {
        if let Some(asset) = picture_candidate {
            // Reuse the asset verbatim; the displayed color is re-derived
            // from it, and forced to neutral when color tracking is off.
            stimulus.color = Some(if color_enabled {
                embedded_color(&asset).unwrap_or(NEUTRAL_COLOR)
            } else {
                NEUTRAL_COLOR
            });
            stimulus.picture = Some(asset);
        } else {
            let chosen = if color_enabled {
                color_candidate.unwrap_or_else(|| pick(rng, &COLOR_NAMES))
            } else {
                NEUTRAL_COLOR
            };
            let piece = pick(rng, config.image_set.pieces());
            stimulus.picture = Some(picture_asset(
                config.image_set,
                color_mode,
                piece,
                (color_mode == ImageColorMode::Colour).then_some(chosen),
            ));
            stimulus.color = Some(chosen);
        }
    } else {
        // No picture, but color keeps advancing: forced candidate when
        // eligible, neutral otherwise.
        stimulus.color = Some(if color_enabled {
            color_candidate.unwrap_or(NEUTRAL_COLOR)
        } else {
            NEUTRAL_COLOR
        });
    }

    // Sound is a fixed placeholder label until real audio cues exist.
    let sound_candidate = if draws_forced_match(rng, config, t, Modality::Sound) {
        lagged.and_then(|s| s.sound)
    } else {
        None
    };
    stimulus.sound = config
        .enabled(Modality::Sound)
        .then(|| sound_candidate.unwrap_or(SOUND_LABEL));

    let truth = compute_truth(config, t, history, &stimulus);

    Trial {
        t,
        started_at_ms: clock.now_ms(),
        stimulus,
        truth,
        responses: PerModality::default(),
    }
}

/// One uniform draw per eligible modality: forced matches only apply once
/// enough history exists and the modality participates.
fn draws_forced_match<R: Rng>(
    rng: &mut R,
    config: &GameConfig,
    t: usize,
    modality: Modality,
) -> bool {
    t >= config.n && config.enabled(modality) && rng.random::<f64>() < config.match_probability
}

/// Uniform grid index, optionally resampled away from `previous`. The
/// retry is skipped on a single-cell grid, where the constraint is
/// vacuous.
fn next_position<R: Rng>(
    rng: &mut R,
    cells: usize,
    previous: Option<usize>,
    avoid_repeat: bool,
) -> usize {
    let previous = match previous {
        Some(p) if avoid_repeat && cells > 1 => p,
        _ => return rng.random_range(0..cells),
    };
    loop {
        let candidate = rng.random_range(0..cells);
        if candidate != previous {
            return candidate;
        }
    }
}

/// Truth is decided by comparing final stimulus values against real
/// history, never by trusting the forced-match draw. Coincidental matches
/// from independent draws count, and values rewritten by the
/// picture/color coupling are compared as displayed.
fn compute_truth(config: &GameConfig, t: usize, history: &[Trial], stimulus: &Stimulus) -> TruthMap {
    let mut truth = TruthMap::default();
    let lagged = t.checked_sub(config.n).and_then(|i| history.get(i));
    for modality in Modality::ALL {
        if !config.enabled(modality) {
            continue;
        }
        let matched = lagged.is_some_and(|prior| stimulus.matches(&prior.stimulus, modality));
        *truth.get_mut(modality) = Some(matched);
    }
    truth
}

fn pick<R: Rng>(rng: &mut R, items: &[&'static str]) -> &'static str {
    items[rng.random_range(0..items.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadback_core::ImageSet;
    use quadback_timing::ManualClock;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn enable_only(config: &mut GameConfig, keep: &[Modality]) {
        for modality in Modality::ALL {
            config.modalities.get_mut(modality).enabled = keep.contains(&modality);
        }
    }

    fn run_session(config: &GameConfig, trials: usize, seed: u64) -> Vec<Trial> {
        let mut rng = StdRng::seed_from_u64(seed);
        let clock = ManualClock::new();
        let mut history = Vec::with_capacity(trials);
        for t in 0..trials {
            let trial = generate(t, config, &history, &mut rng, &clock);
            history.push(trial);
            clock.advance_ms(config.tick_ms);
        }
        history
    }

    #[test]
    fn trial_shape_is_deterministic() {
        let config = GameConfig::default();
        let history = run_session(&config, 10, 7);
        for (t, trial) in history.iter().enumerate() {
            assert_eq!(trial.t, t);
            for modality in Modality::ALL {
                assert_eq!(
                    trial.truth_of(modality).is_some(),
                    config.enabled(modality),
                    "truth entry present iff enabled"
                );
                assert!(!trial.has_response(modality));
            }
            assert!(trial.stimulus.position.is_some());
            assert!(trial.stimulus.color.is_some());
        }
    }

    #[test]
    fn truth_is_false_before_enough_history() {
        let mut config = GameConfig {
            n: 3,
            match_probability: 1.0,
            ..GameConfig::default()
        };
        enable_only(
            &mut config,
            &[
                Modality::Position,
                Modality::Color,
                Modality::Picture,
                Modality::Sound,
            ],
        );
        let history = run_session(&config, 3, 11);
        for trial in &history {
            for modality in Modality::ALL {
                assert_eq!(trial.truth_of(modality), Some(false));
            }
        }
    }

    #[test]
    fn forced_position_matches_chain_at_probability_one() {
        let mut config = GameConfig {
            n: 1,
            match_probability: 1.0,
            grid_size: 3,
            ..GameConfig::default()
        };
        enable_only(&mut config, &[Modality::Position]);
        let history = run_session(&config, 3, 42);

        assert_eq!(history[0].truth_of(Modality::Position), Some(false));
        let p0 = history[0].stimulus.position;
        assert_eq!(history[1].stimulus.position, p0);
        assert_eq!(history[1].truth_of(Modality::Position), Some(true));
        assert_eq!(history[2].stimulus.position, p0);
        assert_eq!(history[2].truth_of(Modality::Position), Some(true));
    }

    #[test]
    fn disabled_position_never_repeats_consecutively() {
        let mut config = GameConfig {
            grid_size: 2,
            ..GameConfig::default()
        };
        enable_only(&mut config, &[Modality::Picture]);
        let history = run_session(&config, 200, 3);
        for pair in history.windows(2) {
            assert_ne!(
                pair[0].stimulus.position, pair[1].stimulus.position,
                "consecutive repeat at t={}",
                pair[1].t
            );
        }
    }

    #[test]
    fn single_cell_grid_terminates() {
        let mut config = GameConfig {
            grid_size: 1,
            ..GameConfig::default()
        };
        enable_only(&mut config, &[Modality::Picture]);
        let history = run_session(&config, 20, 5);
        for trial in &history {
            assert_eq!(trial.stimulus.position, Some(0));
        }
    }

    #[test]
    fn mono_pictures_carry_no_color_and_neutral_swatch() {
        let mut config = GameConfig {
            image_set: ImageSet::Shapes,
            image_color_mode: ImageColorMode::NoColour,
            match_probability: 1.0,
            ..GameConfig::default()
        };
        enable_only(&mut config, &[Modality::Picture]);
        let history = run_session(&config, 50, 9);
        for trial in &history {
            let asset = trial.stimulus.picture.as_deref().unwrap();
            assert!(asset.starts_with("/images/shapes/no-colour/"));
            assert_eq!(embedded_color(asset), None);
            assert_eq!(trial.stimulus.color, Some(NEUTRAL_COLOR));
        }
    }

    #[test]
    fn reused_picture_forces_neutral_color_when_color_disabled() {
        let mut config = GameConfig {
            n: 1,
            match_probability: 1.0,
            ..GameConfig::default()
        };
        enable_only(&mut config, &[Modality::Picture]);
        // Seed history with a colour-mode asset, as if color had been
        // enabled when it was generated.
        let clock = ManualClock::new();
        let mut rng = StdRng::seed_from_u64(13);
        let seeded = Trial {
            t: 0,
            started_at_ms: 0,
            stimulus: Stimulus {
                position: Some(0),
                color: Some("red"),
                picture: Some("/images/tetris/colour/t-red.svg".into()),
                sound: None,
            },
            truth: TruthMap::default(),
            responses: PerModality::default(),
        };
        let history = vec![seeded];
        let trial = generate(1, &config, &history, &mut rng, &clock);
        assert_eq!(
            trial.stimulus.picture.as_deref(),
            Some("/images/tetris/colour/t-red.svg")
        );
        assert_eq!(trial.stimulus.color, Some(NEUTRAL_COLOR));
        assert_eq!(trial.truth_of(Modality::Picture), Some(true));
    }

    #[test]
    fn sound_is_absent_when_disabled_and_labelled_when_enabled() {
        let mut config = GameConfig::default();
        enable_only(&mut config, &[Modality::Sound]);
        let history = run_session(&config, 10, 17);
        for trial in &history {
            assert_eq!(trial.stimulus.sound, Some(SOUND_LABEL));
            assert_eq!(trial.stimulus.picture, None);
            assert_eq!(trial.stimulus.color, Some(NEUTRAL_COLOR));
        }

        enable_only(&mut config, &[Modality::Position]);
        let history = run_session(&config, 10, 17);
        for trial in &history {
            assert_eq!(trial.stimulus.sound, None);
        }
    }

    #[test]
    fn incidental_matches_are_scored_true_at_probability_zero() {
        // One cell, position enabled, p = 0: every trial lands on cell 0,
        // so from t >= n the truth must still come out true.
        let mut config = GameConfig {
            n: 1,
            grid_size: 1,
            match_probability: 0.0,
            ..GameConfig::default()
        };
        enable_only(&mut config, &[Modality::Position]);
        let history = run_session(&config, 10, 23);
        assert_eq!(history[0].truth_of(Modality::Position), Some(false));
        for trial in &history[1..] {
            assert_eq!(trial.truth_of(Modality::Position), Some(true));
        }
    }

    #[test]
    fn timestamps_come_from_the_injected_clock() {
        let config = GameConfig::default();
        let history = run_session(&config, 4, 1);
        for (t, trial) in history.iter().enumerate() {
            assert_eq!(trial.started_at_ms, t as u64 * config.tick_ms);
        }
    }
}
