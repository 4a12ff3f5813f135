//! Mood2Music Server Library
//!
//! Free-text mood in, a handful of matching tracks with preview videos out.
//! This library exposes the internal modules for the binaries and for testing.

pub mod catalog;
pub mod config;
pub mod mood;
pub mod pipeline;
pub mod recommend;
pub mod server;
pub mod video;

// Re-export commonly used types for convenience
pub use catalog::{load_catalog, Catalog};
pub use pipeline::{MoodPipeline, PipelineError, RecommendationResult};
pub use server::{run_server, RequestsLoggingLevel};
