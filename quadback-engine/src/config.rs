use quadback_core::{ImageColorMode, ImageSet, Modality, PerModality};
use serde::{Deserialize, Serialize};

/// Per-modality session settings: whether the modality participates and
/// which key flags "this is a match".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalityConfig {
    pub enabled: bool,
    pub match_key: char,
}

/// Session parameters. Frozen for the lifetime of a session; edits apply
/// only to sessions started afterwards. Range validation (n ≥ 1, grid
/// size ≥ 1, probability in 0..=1) belongs to the settings layer, not
/// here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Lag distance for match comparisons.
    pub n: usize,
    /// External pacing; the generator itself never reads it.
    pub tick_ms: u64,
    pub total_trials: usize,
    /// The grid is `grid_size × grid_size` cells.
    pub grid_size: usize,
    /// Target probability that an eligible modality is forced into a
    /// match at `t >= n`.
    pub match_probability: f64,
    pub image_set: ImageSet,
    pub image_color_mode: ImageColorMode,
    pub modalities: PerModality<ModalityConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            n: 2,
            tick_ms: 1200,
            total_trials: 24,
            grid_size: 3,
            match_probability: 0.3,
            image_set: ImageSet::Tetris,
            image_color_mode: ImageColorMode::Colour,
            modalities: PerModality {
                position: ModalityConfig {
                    enabled: true,
                    match_key: 'a',
                },
                color: ModalityConfig {
                    enabled: false,
                    match_key: 's',
                },
                picture: ModalityConfig {
                    enabled: true,
                    match_key: 'd',
                },
                sound: ModalityConfig {
                    enabled: false,
                    match_key: 'f',
                },
            },
        }
    }
}

impl GameConfig {
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    pub fn enabled(&self, modality: Modality) -> bool {
        self.modalities.get(modality).enabled
    }

    /// Resolves a pressed key to the enabled modality it is bound to,
    /// case-insensitively. Disabled modalities never resolve.
    pub fn resolve_match_key(&self, key: char) -> Option<Modality> {
        Modality::ALL.into_iter().find(|&modality| {
            let mc = self.modalities.get(modality);
            mc.enabled && mc.match_key.eq_ignore_ascii_case(&key)
        })
    }
}
