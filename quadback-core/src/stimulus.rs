use serde::{Deserialize, Serialize};

use crate::Modality;

pub const TETRIS_PIECES: [&str; 7] = ["i", "j", "l", "o", "s", "t", "z"];
pub const SHAPE_PIECES: [&str; 5] = ["circle", "diamond", "pentagon", "square", "triangle"];
pub const COLOR_NAMES: [&str; 6] = ["blue", "green", "orange", "purple", "red", "yellow"];

/// Displayed color when the color modality is not tracking.
pub const NEUTRAL_COLOR: &str = "black";
/// Placeholder cue until real audio exists.
pub const SOUND_LABEL: &str = "beep";

/// Picture vocabulary for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSet {
    Tetris,
    Shapes,
}

impl ImageSet {
    pub fn folder(&self) -> &'static str {
        match self {
            ImageSet::Tetris => "tetris",
            ImageSet::Shapes => "shapes",
        }
    }

    pub fn pieces(&self) -> &'static [&'static str] {
        match self {
            ImageSet::Tetris => &TETRIS_PIECES,
            ImageSet::Shapes => &SHAPE_PIECES,
        }
    }
}

/// Whether picture assets encode a color token in their identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageColorMode {
    #[serde(rename = "colour")]
    Colour,
    #[serde(rename = "no-colour")]
    NoColour,
}

/// Builds an asset identifier matching the on-disk image inventory:
/// `/images/{set}/colour/{piece}-{color}.svg` or
/// `/images/{set}/no-colour/{piece}.svg`.
pub fn picture_asset(
    set: ImageSet,
    mode: ImageColorMode,
    piece: &str,
    color: Option<&str>,
) -> String {
    match (mode, color) {
        (ImageColorMode::Colour, Some(color)) => {
            format!("/images/{}/colour/{piece}-{color}.svg", set.folder())
        }
        _ => format!("/images/{}/no-colour/{piece}.svg", set.folder()),
    }
}

/// Decodes the color token embedded in an asset identifier, if any.
/// Returns `None` for no-colour assets.
pub fn embedded_color(asset: &str) -> Option<&'static str> {
    COLOR_NAMES
        .into_iter()
        .find(|color| asset.ends_with(&format!("-{color}.svg")))
}

/// Stimulus values for one tick. A field is populated only when it is
/// meaningful for that trial; position and color stay populated even when
/// their modalities are disabled so the grid display stays continuous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stimulus {
    pub position: Option<usize>,
    pub color: Option<&'static str>,
    pub picture: Option<String>,
    pub sound: Option<&'static str>,
}

impl Stimulus {
    /// Value equality on one modality. An absent value on either side
    /// never matches.
    pub fn matches(&self, other: &Stimulus, modality: Modality) -> bool {
        match modality {
            Modality::Position => both_eq(self.position, other.position),
            Modality::Color => both_eq(self.color, other.color),
            Modality::Picture => both_eq(self.picture.as_deref(), other.picture.as_deref()),
            Modality::Sound => both_eq(self.sound, other.sound),
        }
    }
}

fn both_eq<T: PartialEq>(a: Option<T>, b: Option<T>) -> bool {
    a.zip(b).is_some_and(|(a, b)| a == b)
}
