use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use commentlens::config::Config;
use commentlens::openai::client::OpenAiClient;
use commentlens::output::report::AnalysisResult;
use commentlens::pipeline::analysis::{CommentAnalyzer, PipelineSettings};
use commentlens::pipeline::input::read_comment_file;
use commentlens::pipeline::video::VideoAnalyzer;

/// commentlens: what a video's comment section is saying.
///
/// Fetches comments for a YouTube video and reports their sentiment, main
/// topics, emotional tone and key phrases.
#[derive(Parser)]
#[command(name = "commentlens", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and analyze the comments of a YouTube video
    Analyze {
        /// Video URL (youtube.com/watch?v=... or youtu.be/...)
        url: String,

        /// Print the full result as JSON instead of the terminal report
        #[arg(long)]
        json: bool,
    },

    /// Analyze comments from a file (JSON array or one comment per line)
    AnalyzeFile {
        path: PathBuf,

        /// Print the full result as JSON instead of the terminal report
        #[arg(long)]
        json: bool,
    },

    /// Start the web API
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: 5000)
        #[arg(long, default_value = "5000")]
        port: u16,

        /// Address to bind (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("commentlens=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { url, json } => {
            let config = Config::load()?;
            let video = VideoAnalyzer::from_config(&config)?;

            let spinner = spinner("Fetching and analyzing comments...")?;
            let result = video.analyze_url(&url).await;
            spinner.finish_and_clear();

            print_result(&result?, json)?;
        }

        Commands::AnalyzeFile { path, json } => {
            let config = Config::load()?;
            let comments = read_comment_file(&path)?;
            info!(comments = comments.len(), path = %path.display(), "Loaded comment file");

            let mut analyzer = CommentAnalyzer::new(PipelineSettings::default());
            if config.has_openai() {
                analyzer = analyzer.with_text_generator(Arc::new(OpenAiClient::new(
                    config.openai_api_key.clone(),
                    &config.openai_api_url,
                    &config.openai_model,
                )?));
            }
            let deadline = config.topic_deadline.map(|d| Instant::now() + d);

            let spinner = spinner(&format!("Analyzing {} comments...", comments.len()))?;
            let result = analyzer.analyze(&comments, deadline).await;
            spinner.finish_and_clear();

            print_result(&result?, json)?;
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            let video = VideoAnalyzer::from_config(&config)?;
            commentlens::web::run_server(video, port, &bind).await?;
        }
    }

    Ok(())
}

fn spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("  {spinner} {msg} ({elapsed})")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    Ok(pb)
}

fn print_result(result: &AnalysisResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }
    commentlens::output::terminal::display_report(result);
    if result.is_degraded() {
        println!(
            "{}",
            "Some stages fell back to defaults; see the warnings above.".dimmed()
        );
    }
    Ok(())
}
