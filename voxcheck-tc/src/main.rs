//! Transcoding client (voxcheck-tc) - Main entry point
//!
//! One-shot flow: read a recorded voice clip, convert it to canonical mono
//! 16-bit PCM WAV, submit it to the scoring service, print the risk score.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voxcheck_tc::{ScoringClient, Transcoder};

/// Command-line arguments for voxcheck-tc
#[derive(Parser, Debug)]
#[command(name = "voxcheck-tc")]
#[command(about = "Transcode a recorded voice clip and submit it for scoring")]
#[command(version)]
struct Args {
    /// Recorded audio clip (MP3, FLAC, OGG, M4A, WAV)
    input: PathBuf,

    /// Scoring endpoint URL (overrides env var and config file)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Upload timeout in seconds (overrides env var and config file)
    #[arg(short, long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voxcheck_tc=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config =
        voxcheck_common::config::resolve_upload_config(args.endpoint.as_deref(), args.timeout_secs)
            .context("Failed to resolve upload configuration")?;

    let input = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read recording {}", args.input.display()))?;
    info!(
        "Read {} byte recording from {}",
        input.len(),
        args.input.display()
    );

    let transcoder = Transcoder::with_default_decoder();
    let wav = transcoder
        .transcode(input)
        .await
        .context("Failed to convert recording to WAV")?;
    info!("Converted recording to {} byte canonical WAV", wav.len());

    let client = ScoringClient::new(config.endpoint.clone(), config.timeout)
        .context("Failed to build scoring client")?;
    let risk_score = client
        .submit(wav)
        .await
        .with_context(|| format!("Failed to score recording via {}", config.endpoint))?;

    println!("risk_score: {:.2}", risk_score);

    Ok(())
}
