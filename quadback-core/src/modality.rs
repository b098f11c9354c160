use std::fmt;

use serde::{Deserialize, Serialize};

/// The four stimulus channels of a quad n-back trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Position,
    Color,
    Picture,
    Sound,
}

impl Modality {
    pub const ALL: [Modality; 4] = [
        Modality::Position,
        Modality::Color,
        Modality::Picture,
        Modality::Sound,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Modality::Position => "position",
            Modality::Color => "color",
            Modality::Picture => "picture",
            Modality::Sound => "sound",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One slot per modality. Backs configs, truth maps and response maps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerModality<T> {
    pub position: T,
    pub color: T,
    pub picture: T,
    pub sound: T,
}

impl<T> PerModality<T> {
    pub fn get(&self, modality: Modality) -> &T {
        match modality {
            Modality::Position => &self.position,
            Modality::Color => &self.color,
            Modality::Picture => &self.picture,
            Modality::Sound => &self.sound,
        }
    }

    pub fn get_mut(&mut self, modality: Modality) -> &mut T {
        match modality {
            Modality::Position => &mut self.position,
            Modality::Color => &mut self.color,
            Modality::Picture => &mut self.picture,
            Modality::Sound => &mut self.sound,
        }
    }
}
