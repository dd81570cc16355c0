use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use subplot_core::{
    load_config, validate_config, BatchReport, BatchRunner, FileResult, OpenSubtitlesClient,
    SubtitleService,
};

/// Download subtitles for local video files.
#[derive(Debug, Parser)]
#[command(
    name = "subplot",
    version,
    about = "Matches local video files against a subtitle database and downloads the best candidate next to each file"
)]
struct Cli {
    /// Video files or directories to process (directories are scanned one
    /// level deep).
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Comma-separated language preference list (overrides the config file).
    #[arg(short, long)]
    languages: Option<String>,

    /// Path to the configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Determine config path
    let config_path = cli
        .config
        .or_else(|| std::env::var("SUBPLOT_CONFIG").map(PathBuf::from).ok())
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_config(&config).context("Configuration validation failed")?;

    let languages = cli
        .languages
        .unwrap_or_else(|| config.download.languages.clone());

    info!("Authenticating with subtitle service");
    let client = OpenSubtitlesClient::login(config.opensubtitles.clone())
        .await
        .context("Login failed")?;

    let runner = BatchRunner::new(Arc::new(client) as Arc<dyn SubtitleService>, languages);
    let report = runner.run(&cli.paths).await;

    print_report(&report);

    // Partial failure is visible to scripted callers via the exit code.
    if report.failed() > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn print_report(report: &BatchReport) {
    println!();
    println!(
        "Processed {} file(s) in {} ms: {} downloaded, {} without a match, {} failed",
        report.outcomes.len(),
        report.duration_ms,
        report.downloaded(),
        report.unmatched(),
        report.failed()
    );

    for outcome in &report.outcomes {
        match &outcome.result {
            FileResult::NoMatch => {
                println!("  NO MATCH  {}", outcome.video.display());
            }
            FileResult::Failed { reason } => {
                println!("  FAILED    {}: {}", outcome.video.display(), reason);
            }
            FileResult::Downloaded { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_paths_and_languages() {
        let cli = Cli::parse_from(["subplot", "-l", "en,de", "a.mkv", "library/"]);
        assert_eq!(cli.languages.as_deref(), Some("en,de"));
        assert_eq!(cli.paths.len(), 2);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_requires_at_least_one_path() {
        assert!(Cli::try_parse_from(["subplot"]).is_err());
    }
}
