use crate::mood::DetectedMood;
use crate::recommend::RecommendedTrack;
use crate::video::VideoResolution;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    Matched,
    /// The mood's predicate left nothing. Not an error.
    NoMatchingTracks,
}

impl RecommendationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationStatus::Matched => "matched",
            RecommendationStatus::NoMatchingTracks => "no_matching_tracks",
        }
    }
}

/// One row of the payload handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationEntry {
    /// 1-based.
    pub rank: usize,
    pub name: String,
    pub artists: String,
    pub video_id: Option<String>,
    pub embed_url: Option<String>,
    pub preview_available: bool,
    /// Set when the search provider failed for this track.
    pub preview_error: Option<String>,
}

impl RecommendationEntry {
    pub fn new(rank: usize, track: RecommendedTrack, resolution: &VideoResolution) -> Self {
        let preview_error = match resolution {
            VideoResolution::Unavailable(detail) => Some(detail.clone()),
            _ => None,
        };
        RecommendationEntry {
            rank,
            name: track.name,
            artists: track.artists,
            video_id: resolution.video_id().map(|id| id.to_string()),
            embed_url: resolution.embed_url(),
            preview_available: resolution.video_id().is_some(),
            preview_error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    pub mood: DetectedMood,
    pub status: RecommendationStatus,
    pub tracks: Vec<RecommendationEntry>,
}

impl RecommendationResult {
    pub fn new(mood: DetectedMood, tracks: Vec<RecommendationEntry>) -> Self {
        let status = if tracks.is_empty() {
            RecommendationStatus::NoMatchingTracks
        } else {
            RecommendationStatus::Matched
        };
        RecommendationResult {
            mood,
            status,
            tracks,
        }
    }
}
