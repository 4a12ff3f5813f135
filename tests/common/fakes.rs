//! In-process stand-ins for the hosted classification and search APIs.

use super::constants::*;
use async_trait::async_trait;
use mood2music_server::mood::{ClassificationError, ClassifierOutput, LabelScore, TextClassifier};
use mood2music_server::video::{SearchProviderError, VideoCandidate, VideoSearch};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Always ranks the same label first. `None` makes every call fail.
pub struct FakeClassifier {
    answer: Option<String>,
    calls: AtomicUsize,
}

impl FakeClassifier {
    pub fn new(answer: Option<&str>) -> Self {
        Self {
            answer: answer.map(str::to_string),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextClassifier for FakeClassifier {
    fn name(&self) -> &str {
        "fake"
    }

    async fn classify(
        &self,
        _text: &str,
        candidate_labels: Option<&[String]>,
    ) -> Result<ClassifierOutput, ClassificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let answer = self.answer.as_ref().ok_or_else(|| ClassificationError::Api {
            status: 503,
            message: "Model is currently loading".to_string(),
        })?;

        // Rank every other candidate below the answer, like the real API
        let mut ranked = vec![LabelScore::new(answer.as_str(), 0.8)];
        ranked.extend(
            candidate_labels
                .unwrap_or_default()
                .iter()
                .filter(|label| *label != answer)
                .map(|label| LabelScore::new(label.as_str(), 0.01)),
        );
        Ok(ClassifierOutput::Ranked(ranked))
    }
}

/// Answers by track name, the first words of the query.
pub struct FakeVideoSearch;

#[async_trait]
impl VideoSearch for FakeVideoSearch {
    fn name(&self) -> &str {
        "fake"
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<VideoCandidate>, SearchProviderError> {
        let candidates = if query.starts_with(GYM_TRACK_OFFICIAL) {
            vec![
                VideoCandidate::new("Iron Pulse (slowed + reverb)", "edits", "vid-slowed"),
                VideoCandidate::new(
                    "Iron Pulse - Official Video",
                    "The Lifters",
                    GYM_TRACK_OFFICIAL_VIDEO_ID,
                ),
            ]
        } else if query.starts_with(GYM_TRACK_LIVE_ONLY) {
            (0..10)
                .map(|i| {
                    VideoCandidate::new(
                        &format!("Heavy Set Live at Festival {}", i),
                        "fan",
                        &format!("vid-live-{}", i),
                    )
                })
                .collect()
        } else if query.starts_with(ANGRY_TRACK) {
            return Err(SearchProviderError::Api {
                status: 403,
                message: SEARCH_FAILURE_MESSAGE.to_string(),
            });
        } else {
            let name = query.split(" official OR").next().unwrap_or_default();
            vec![VideoCandidate::new(
                &format!("{} (Lyrics)", name),
                "lyrics channel",
                &format!("vid-{}", name.to_lowercase().replace(' ', "-")),
            )]
        };
        Ok(candidates.into_iter().take(max_results).collect())
    }
}
