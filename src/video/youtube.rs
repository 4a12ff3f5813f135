//! YouTube Data API v3 search client.

use super::search::{SearchProviderError, VideoSearch};
use super::VideoCandidate;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Calls `search.list` restricted to embeddable videos.
pub struct YouTubeSearchClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl YouTubeSearchClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn search_url(&self, query: &str, max_results: usize) -> String {
        format!(
            "{}/search?part=snippet&type=video&videoEmbeddable=true&maxResults={}&q={}&key={}",
            self.base_url,
            max_results,
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl VideoSearch for YouTubeSearchClient {
    fn name(&self) -> &str {
        "youtube"
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<VideoCandidate>, SearchProviderError> {
        debug!(query, max_results, "Searching YouTube");

        let response = self
            .client
            .get(self.search_url(query, max_results))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchProviderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await.map_err(map_transport_error)?;
        let mut candidates = parse_search_response(&body)?;
        candidates.truncate(max_results);
        Ok(candidates)
    }
}

fn map_transport_error(e: reqwest::Error) -> SearchProviderError {
    if e.is_timeout() {
        SearchProviderError::Timeout
    } else {
        SearchProviderError::Connection(e.to_string())
    }
}

// YouTube API types

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    #[serde(default)]
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    channel_title: String,
}

/// Reads a `search.list` body. Items that are not videos are skipped.
pub fn parse_search_response(body: &str) -> Result<Vec<VideoCandidate>, SearchProviderError> {
    let parsed: SearchListResponse = serde_json::from_str(body).map_err(|e| {
        SearchProviderError::InvalidResponse(format!("Failed to parse search response: {}", e))
    })?;

    Ok(parsed
        .items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id.video_id.filter(|id| !id.is_empty())?;
            let snippet = item.snippet.unwrap_or_default();
            Some(VideoCandidate::new(
                &snippet.title,
                &snippet.channel_title,
                &video_id,
            ))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let body = r#"{
            "kind": "youtube#searchListResponse",
            "items": [
                {
                    "id": {"kind": "youtube#video", "videoId": "abc123"},
                    "snippet": {"title": "Song (Official Video)", "channelTitle": "ArtistVEVO"}
                },
                {
                    "id": {"kind": "youtube#channel", "channelId": "UC1"},
                    "snippet": {"title": "Artist channel", "channelTitle": "Artist"}
                },
                {
                    "id": {"kind": "youtube#video", "videoId": "def456"}
                }
            ]
        }"#;

        let candidates = parse_search_response(body).unwrap();
        assert_eq!(
            candidates,
            vec![
                VideoCandidate::new("Song (Official Video)", "ArtistVEVO", "abc123"),
                VideoCandidate::new("", "", "def456"),
            ]
        );
    }

    #[test]
    fn test_parse_empty_and_invalid() {
        assert!(parse_search_response(r#"{"items": []}"#).unwrap().is_empty());
        assert!(parse_search_response("{}").unwrap().is_empty());
        assert!(matches!(
            parse_search_response("<html>"),
            Err(SearchProviderError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_search_url_encodes_query() {
        let client = YouTubeSearchClient::new("https://example.test/v3/", "k&y");
        let url = client.search_url("Song Artist official OR lyrics", 10);
        assert_eq!(
            url,
            "https://example.test/v3/search?part=snippet&type=video&videoEmbeddable=true\
             &maxResults=10&q=Song%20Artist%20official%20OR%20lyrics&key=k%26y"
        );
    }
}
