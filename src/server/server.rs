use anyhow::{Context, Result};
use std::time::{Duration, Instant};

use tracing::{error, info};

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{log_requests, metrics, state::*, ServerConfig};
use crate::pipeline::PipelineError;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub tracks_count: usize,
    pub usable_tracks_count: usize,
    pub moods_count: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize, Debug)]
struct TextBody {
    pub text: String,
}

#[derive(Serialize)]
struct MoodView {
    label: String,
    glyph: String,
    predicate: String,
}

#[derive(Serialize)]
struct MoodResponse {
    label: String,
    glyph: String,
    display: String,
    source: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn pipeline_error_response(err: PipelineError, endpoint: &str) -> Response {
    let (status, error_type) = match &err {
        PipelineError::EmptyInput => (StatusCode::BAD_REQUEST, "empty_input"),
        PipelineError::Classification(cause) => {
            error!("Mood classification failed on {}: {}", endpoint, cause);
            (StatusCode::BAD_GATEWAY, "classification")
        }
    };
    metrics::record_error(error_type, endpoint);
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let catalog = state.pipeline.catalog();
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        tracks_count: catalog.tracks_count(),
        usable_tracks_count: catalog.usable_tracks_count(),
        moods_count: state.pipeline.vocabulary().len(),
    };
    Json(stats)
}

async fn get_moods(State(pipeline): State<GuardedPipeline>) -> impl IntoResponse {
    let moods: Vec<MoodView> = pipeline
        .vocabulary()
        .iter()
        .map(|mood| MoodView {
            label: mood.label.to_string(),
            glyph: mood.glyph.clone(),
            predicate: mood.predicate.to_string(),
        })
        .collect();
    Json(moods)
}

async fn post_mood(
    State(pipeline): State<GuardedPipeline>,
    Json(body): Json<TextBody>,
) -> Response {
    match pipeline.detect_mood(&body.text).await {
        Ok(mood) => Json(MoodResponse {
            display: mood.display(),
            label: mood.label.to_string(),
            glyph: mood.glyph,
            source: mood.source.as_str(),
        })
        .into_response(),
        Err(err) => pipeline_error_response(err, "/v1/mood"),
    }
}

async fn post_recommend(
    State(pipeline): State<GuardedPipeline>,
    Json(body): Json<TextBody>,
) -> Response {
    match pipeline.run(&body.text).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => pipeline_error_response(err, "/v1/recommend"),
    }
}

pub fn make_app(config: ServerConfig, pipeline: GuardedPipeline) -> Router {
    let state = ServerState {
        config,
        start_time: Instant::now(),
        pipeline,
        hash: env!("GIT_HASH").to_owned(),
    };

    let api_routes: Router = Router::new()
        .route("/moods", get(get_moods))
        .route("/mood", post(post_mood))
        .route("/recommend", post(post_recommend))
        .with_state(state.clone());

    Router::new()
        .route("/", get(home))
        .with_state(state.clone())
        .nest("/v1", api_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics::metrics_handler))
}

pub async fn run_server(config: ServerConfig, pipeline: GuardedPipeline) -> Result<()> {
    let port = config.port;
    let metrics_port = config.metrics_port;
    let app = make_app(config, pipeline);

    let metrics_listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", metrics_port))?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(metrics_listener, make_metrics_app()).await {
            error!("Metrics server stopped: {}", e);
        }
    });
    info!("Metrics available at port {}!", metrics_port);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Ready to serve at port {}!", port);

    Ok(axum::serve(listener, app).await?)
}
