//! Picks one representative video for a track out of a noisy search list.
//!
//! Candidates are judged in tiers. A tier scans the whole list before the
//! next, looser tier is tried, so a clean "official" upload further down the
//! list beats an aesthetic edit at the top.

use super::search::VideoSearch;
use super::{VideoCandidate, VideoId};
use crate::server::metrics;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_MAX_RESULTS: usize = 10;

const QUERY_SUFFIX: &str = "official OR lyrics OR lyrical OR slowed OR reverb OR lofi";
const OFFICIAL_TERMS: [&str; 3] = ["official", "lyrics", "lyrical"];
const AESTHETIC_TERMS: [&str; 3] = ["lofi", "slowed", "reverb"];
const EXCLUDED_TERMS: [&str; 4] = ["cover", "live", "shorts", "#shorts"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptanceTier {
    Official,
    Aesthetic,
    AnyClean,
}

impl AcceptanceTier {
    /// Strictest first.
    pub const ORDERED: [AcceptanceTier; 3] = [
        AcceptanceTier::Official,
        AcceptanceTier::Aesthetic,
        AcceptanceTier::AnyClean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AcceptanceTier::Official => "official",
            AcceptanceTier::Aesthetic => "aesthetic",
            AcceptanceTier::AnyClean => "any_clean",
        }
    }

    /// `lowercase_query` is the "{name} {artist}" part of the search.
    fn accepts(&self, candidate: &VideoCandidate, lowercase_query: &str) -> bool {
        let title = candidate.title.to_lowercase();
        if contains_any(&title, &EXCLUDED_TERMS) {
            return false;
        }
        match self {
            AcceptanceTier::Official => {
                let channel = candidate.channel_title.trim().to_lowercase();
                contains_any(&title, &OFFICIAL_TERMS)
                    || (!channel.is_empty() && lowercase_query.contains(&channel))
            }
            AcceptanceTier::Aesthetic => contains_any(&title, &AESTHETIC_TERMS),
            AcceptanceTier::AnyClean => true,
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// The text sent to the search provider for a track.
pub fn build_search_query(name: &str, artist: &str) -> String {
    format!("{} {} {}", name, artist, QUERY_SUFFIX)
}

/// First candidate accepted by the strictest tier that accepts any.
pub fn select_candidate<'a>(
    candidates: &'a [VideoCandidate],
    name: &str,
    artist: &str,
) -> Option<(&'a VideoCandidate, AcceptanceTier)> {
    let lowercase_query = format!("{} {}", name, artist).to_lowercase();
    AcceptanceTier::ORDERED.iter().find_map(|tier| {
        candidates
            .iter()
            .find(|candidate| tier.accepts(candidate, &lowercase_query))
            .map(|candidate| (candidate, *tier))
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum VideoResolution {
    Found { video_id: VideoId, tier: AcceptanceTier },
    /// The search worked but nothing passed the tiers.
    NoMatch,
    /// The search itself failed or timed out.
    Unavailable(String),
}

impl VideoResolution {
    pub fn video_id(&self) -> Option<&VideoId> {
        match self {
            VideoResolution::Found { video_id, .. } => Some(video_id),
            _ => None,
        }
    }

    pub fn embed_url(&self) -> Option<String> {
        self.video_id().map(VideoId::embed_url)
    }

    pub fn outcome(&self) -> &'static str {
        match self {
            VideoResolution::Found { tier, .. } => tier.as_str(),
            VideoResolution::NoMatch => "no_match",
            VideoResolution::Unavailable(_) => "unavailable",
        }
    }
}

pub struct VideoResolver {
    search: Arc<dyn VideoSearch>,
    max_results: usize,
    timeout: Duration,
}

impl VideoResolver {
    pub fn new(search: Arc<dyn VideoSearch>, max_results: usize, timeout: Duration) -> Self {
        VideoResolver {
            search,
            max_results,
            timeout,
        }
    }

    /// Never fails: provider trouble becomes [`VideoResolution::Unavailable`].
    pub async fn resolve(&self, name: &str, artist: &str) -> VideoResolution {
        let query = build_search_query(name, artist);
        let searched =
            tokio::time::timeout(self.timeout, self.search.search(&query, self.max_results)).await;

        let resolution = match searched {
            Err(_) => {
                warn!(track = name, artist, "Video search timed out");
                VideoResolution::Unavailable("Video search timed out".to_string())
            }
            Ok(Err(err)) => {
                warn!(
                    track = name,
                    artist,
                    provider = self.search.name(),
                    "Video search failed: {}",
                    err
                );
                VideoResolution::Unavailable(err.to_string())
            }
            Ok(Ok(candidates)) => match select_candidate(&candidates, name, artist) {
                Some((candidate, tier)) => VideoResolution::Found {
                    video_id: candidate.video_id.clone(),
                    tier,
                },
                None => VideoResolution::NoMatch,
            },
        };

        debug!(
            track = name,
            artist,
            outcome = resolution.outcome(),
            "Resolved preview video"
        );
        metrics::record_preview_resolution(resolution.outcome());
        resolution
    }
}
