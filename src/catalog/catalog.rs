use super::{AudioDescriptors, Track};

/// The in-memory track collection. Built once, never mutated afterwards.
#[derive(Debug, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Self {
        Catalog { tracks }
    }

    pub fn all_tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Tracks that have every descriptor, in catalog order.
    pub fn usable_tracks(&self) -> impl Iterator<Item = (&Track, AudioDescriptors)> + '_ {
        self.tracks
            .iter()
            .filter_map(|track| track.descriptors().map(|d| (track, d)))
    }

    pub fn tracks_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn usable_tracks_count(&self) -> usize {
        self.usable_tracks().count()
    }
}
