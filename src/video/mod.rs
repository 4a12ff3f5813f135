mod candidate;
mod resolver;
mod search;
mod youtube;

pub use candidate::{VideoCandidate, VideoId};
pub use resolver::{
    build_search_query, select_candidate, AcceptanceTier, VideoResolution, VideoResolver,
    DEFAULT_MAX_RESULTS,
};
pub use search::{SearchProviderError, VideoSearch};
pub use youtube::{YouTubeSearchClient, DEFAULT_YOUTUBE_API_URL};
