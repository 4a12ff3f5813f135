use axum::extract::FromRef;

use crate::pipeline::MoodPipeline;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedPipeline = Arc<MoodPipeline>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub pipeline: GuardedPipeline,
    pub hash: String,
}

impl FromRef<ServerState> for GuardedPipeline {
    fn from_ref(input: &ServerState) -> Self {
        input.pipeline.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
