mod predicate;
mod sampler;

pub use predicate::{Bound, Condition, FilterPredicate};
pub use sampler::{select_tracks, RecommendedTrack, Recommender, DEFAULT_SAMPLE_SIZE};
