use serde::{Deserialize, Serialize};
use std::fmt;

/// A continuous audio attribute a mood predicate can test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Descriptor {
    Valence,
    Energy,
    Danceability,
    Tempo,
}

impl Descriptor {
    pub const ALL: [Descriptor; 4] = [
        Descriptor::Valence,
        Descriptor::Energy,
        Descriptor::Danceability,
        Descriptor::Tempo,
    ];

    /// Name of the catalog column holding this descriptor.
    pub fn column(&self) -> &'static str {
        match self {
            Descriptor::Valence => "valence",
            Descriptor::Energy => "energy",
            Descriptor::Danceability => "danceability",
            Descriptor::Tempo => "tempo",
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// The complete set of descriptors of a usable track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioDescriptors {
    pub valence: f64,
    pub energy: f64,
    pub danceability: f64,
    /// Beats per minute.
    pub tempo: f64,
}

impl AudioDescriptors {
    pub fn get(&self, descriptor: Descriptor) -> f64 {
        match descriptor {
            Descriptor::Valence => self.valence,
            Descriptor::Energy => self.energy,
            Descriptor::Danceability => self.danceability,
            Descriptor::Tempo => self.tempo,
        }
    }
}

/// A catalog row. Descriptors that could not be read are `None`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Track {
    pub name: String,
    pub artists: String,
    pub valence: Option<f64>,
    pub energy: Option<f64>,
    pub danceability: Option<f64>,
    pub tempo: Option<f64>,
}

impl Track {
    /// Returns all four descriptors, or `None` if any of them is missing.
    pub fn descriptors(&self) -> Option<AudioDescriptors> {
        Some(AudioDescriptors {
            valence: self.valence?,
            energy: self.energy?,
            danceability: self.danceability?,
            tempo: self.tempo?,
        })
    }

    pub fn is_usable(&self) -> bool {
        self.descriptors().is_some()
    }
}
