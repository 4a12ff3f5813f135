use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mood2music_server::config::{self, ServiceArgs};
use mood2music_server::pipeline::RecommendationStatus;
use mood2music_server::{load_catalog, MoodPipeline, PipelineError, RecommendationResult};

#[derive(Parser, Debug)]
struct CliArgs {
    #[command(flatten)]
    pub service: ServiceArgs,

    /// Describe how you feel. Without it, moods are read from stdin line by line.
    pub text: Option<String>,
}

fn print_result(result: &RecommendationResult) {
    println!("Detected mood: {}", result.mood.display());
    if result.status == RecommendationStatus::NoMatchingTracks {
        println!("No songs match this mood.");
        return;
    }
    for entry in &result.tracks {
        println!("{}. {} - {}", entry.rank, entry.name, entry.artists);
        match (&entry.embed_url, &entry.preview_error) {
            (Some(url), _) => println!("   {}", url),
            (None, Some(err)) => println!("   Preview unavailable: {}", err),
            (None, None) => println!("   Preview unavailable"),
        }
    }
}

async fn recommend_once(pipeline: &MoodPipeline, text: &str) -> Result<()> {
    match pipeline.run(text).await {
        Ok(result) => print_result(&result),
        Err(PipelineError::EmptyInput) => println!("Please enter something first."),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    // Quieter than the server, stdout is for results
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = cli_args.service.load_file_config()?;
    let cli_config = config::CliConfig::from(&cli_args.service);
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    let catalog = load_catalog(&app_config.catalog_path)
        .with_context(|| format!("Failed to load catalog {:?}", app_config.catalog_path))?;
    eprintln!(
        "Loaded {} tracks ({} usable) from {}",
        catalog.tracks_count(),
        catalog.usable_tracks_count(),
        app_config.catalog_path.display()
    );
    let pipeline = MoodPipeline::from_config(&app_config, Arc::new(catalog))?;

    if let Some(text) = cli_args.text {
        return recommend_once(&pipeline, &text).await;
    }

    let stdin = io::stdin();
    loop {
        print!("How are you feeling? ");
        io::stdout().flush()?;

        let mut user_input = String::new();
        if stdin.lock().read_line(&mut user_input)? == 0 {
            break;
        }

        // A failed lookup should not end the session
        if let Err(err) = recommend_once(&pipeline, user_input.trim()).await {
            eprintln!("Error: {:#}", err);
        }
        println!();
    }
    Ok(())
}
