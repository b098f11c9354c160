pub mod modality;
pub mod stats;
pub mod stimulus;
pub mod trial;

pub use modality::{Modality, PerModality};
pub use stats::{SessionStats, Tally};
pub use stimulus::{
    COLOR_NAMES, ImageColorMode, ImageSet, NEUTRAL_COLOR, SHAPE_PIECES, SOUND_LABEL, Stimulus,
    TETRIS_PIECES, embedded_color, picture_asset,
};
pub use trial::{ResponseEvent, ResponseMap, Trial, TruthMap};
