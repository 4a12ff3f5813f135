//! Text in, ranked tracks with preview videos out.

mod result;

pub use result::{RecommendationEntry, RecommendationResult, RecommendationStatus};

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::mood::{
    ClassificationError, DetectedMood, HuggingFaceClassifier, MoodClassifier, MoodVocabulary,
    TextClassifier,
};
use crate::recommend::Recommender;
use crate::server::metrics;
use crate::video::{VideoResolver, VideoSearch, YouTubeSearchClient};
use anyhow::Context;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Please describe your mood first")]
    EmptyInput,

    #[error("Mood classification failed: {0}")]
    Classification(#[from] ClassificationError),
}

pub struct MoodPipeline {
    catalog: Arc<Catalog>,
    classifier: MoodClassifier,
    recommender: Recommender,
    resolver: VideoResolver,
}

impl MoodPipeline {
    pub fn new(
        catalog: Arc<Catalog>,
        classifier: MoodClassifier,
        recommender: Recommender,
        resolver: VideoResolver,
    ) -> Self {
        MoodPipeline {
            catalog,
            classifier,
            recommender,
            resolver,
        }
    }

    /// Wires the hosted classifier and video search described by `config`.
    pub fn from_config(config: &AppConfig, catalog: Arc<Catalog>) -> anyhow::Result<Self> {
        let classifier_settings = &config.classifier;
        let model: Arc<dyn TextClassifier> = Arc::new(
            HuggingFaceClassifier::new(&classifier_settings.url, &classifier_settings.model)
                .with_api_token(classifier_settings.api_token.clone())
                .with_timeout(Duration::from_secs(classifier_settings.timeout_sec)),
        );
        info!(
            "Classifying moods with {} ({:?})",
            classifier_settings.model, classifier_settings.mode
        );

        let search_settings = &config.video_search;
        let search: Arc<dyn VideoSearch> = Arc::new(
            YouTubeSearchClient::new(&search_settings.url, &search_settings.api_key)
                .with_timeout(Duration::from_secs(search_settings.timeout_sec)),
        );

        Self::with_services(config, catalog, model, search)
    }

    /// Same as [`MoodPipeline::from_config`] with caller-provided backends.
    pub fn with_services(
        config: &AppConfig,
        catalog: Arc<Catalog>,
        model: Arc<dyn TextClassifier>,
        search: Arc<dyn VideoSearch>,
    ) -> anyhow::Result<Self> {
        let vocabulary = Arc::new(config.vocabulary.clone());
        let overrides = config
            .classifier
            .overrides_enabled
            .then(|| config.overrides.clone());
        let classifier = MoodClassifier::new(
            vocabulary.clone(),
            overrides,
            model,
            config.classifier.mode,
        )
        .context("Invalid mood classifier configuration")?;

        let recommender = Recommender::new(
            vocabulary,
            config.recommend.sample_size,
            config.recommend.seed,
        );
        let resolver = VideoResolver::new(
            search,
            config.video_search.max_results,
            Duration::from_secs(config.video_search.timeout_sec),
        );

        Ok(Self::new(catalog, classifier, recommender, resolver))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn vocabulary(&self) -> &MoodVocabulary {
        self.classifier.vocabulary()
    }

    pub async fn detect_mood(&self, text: &str) -> Result<DetectedMood, PipelineError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PipelineError::EmptyInput);
        }
        match self.classifier.detect_mood(text).await {
            Ok(mood) => {
                metrics::record_mood_detected(mood.label.as_str(), mood.source.as_str());
                Ok(mood)
            }
            Err(err) => {
                metrics::record_classification_error();
                Err(err.into())
            }
        }
    }

    pub async fn run(&self, text: &str) -> Result<RecommendationResult, PipelineError> {
        let mood = self.detect_mood(text).await?;
        let picks = self.recommender.recommend(mood.label.as_str(), &self.catalog);

        let resolutions = join_all(
            picks
                .iter()
                .map(|track| self.resolver.resolve(&track.name, &track.artists)),
        )
        .await;

        let tracks: Vec<RecommendationEntry> = picks
            .into_iter()
            .zip(resolutions.iter())
            .enumerate()
            .map(|(i, (track, resolution))| RecommendationEntry::new(i + 1, track, resolution))
            .collect();

        let result = RecommendationResult::new(mood, tracks);
        debug!(
            mood = %result.mood.label,
            tracks = result.tracks.len(),
            "Recommendation ready"
        );
        metrics::record_recommendation(result.status.as_str(), result.tracks.len());
        Ok(result)
    }
}
