use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider-assigned identifier of a playable video.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        VideoId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One search hit. Lives for a single resolution only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoCandidate {
    pub title: String,
    pub channel_title: String,
    pub video_id: VideoId,
}

impl VideoCandidate {
    pub fn new(title: &str, channel_title: &str, video_id: &str) -> Self {
        VideoCandidate {
            title: title.to_string(),
            channel_title: channel_title.to_string(),
            video_id: VideoId::new(video_id),
        }
    }
}
