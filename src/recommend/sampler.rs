//! Mood-conditioned track selection.

use super::FilterPredicate;
use crate::catalog::{Catalog, Track};
use crate::mood::MoodVocabulary;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::debug;

pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// What the recommender hands over for each pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendedTrack {
    pub name: String,
    pub artists: String,
}

impl From<&Track> for RecommendedTrack {
    fn from(track: &Track) -> Self {
        RecommendedTrack {
            name: track.name.clone(),
            artists: track.artists.clone(),
        }
    }
}

/// Filters usable tracks through `predicate` and keeps at most `sample_size`.
///
/// When at least `sample_size` tracks match, a uniform sample without
/// replacement is drawn, in random order. Fewer matches are returned as they
/// are, in catalog order.
pub fn select_tracks<'a, R: Rng + ?Sized>(
    predicate: &FilterPredicate,
    catalog: &'a Catalog,
    sample_size: usize,
    rng: &mut R,
) -> Vec<&'a Track> {
    let matching: Vec<&Track> = catalog
        .usable_tracks()
        .filter(|(_, descriptors)| predicate.matches(descriptors))
        .map(|(track, _)| track)
        .collect();

    if matching.len() < sample_size {
        return matching;
    }

    rand::seq::index::sample(rng, matching.len(), sample_size)
        .into_iter()
        .map(|i| matching[i])
        .collect()
}

pub struct Recommender {
    vocabulary: Arc<MoodVocabulary>,
    sample_size: usize,
    rng: Mutex<StdRng>,
}

impl Recommender {
    /// A fixed `seed` makes the draws reproducible.
    pub fn new(vocabulary: Arc<MoodVocabulary>, sample_size: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Recommender {
            vocabulary,
            sample_size,
            rng: Mutex::new(rng),
        }
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn recommend(&self, mood: &str, catalog: &Catalog) -> Vec<RecommendedTrack> {
        let predicate = self.vocabulary.predicate_for(mood);
        let picks = {
            let mut rng = self.rng.lock().unwrap_or_else(|p| p.into_inner());
            select_tracks(predicate, catalog, self.sample_size, &mut *rng)
        };
        debug!(
            mood,
            predicate = %predicate,
            picked = picks.len(),
            "Selected tracks for mood"
        );
        picks.into_iter().map(RecommendedTrack::from).collect()
    }
}
