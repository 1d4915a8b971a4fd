//! Fraglens CLI - upload gameplay media and print the report
//!
//! # Commands
//!
//! ```bash
//! fraglens upload clip.mp4                      # Aim report from a video
//! fraglens upload shot.png --mode image --analyze   # Match summary + AI insights
//! fraglens analyze report.json                  # AI insights for a saved match summary
//! fraglens inspect report.json                  # Render a saved report offline
//! ```

use clap::{Parser, Subcommand};
use fraglens::{
    analysis_request, render_progress_bar, render_text, ClientConfig, FileHandle, InsightsState,
    LocalFile, MediaKind, Report, ReportView, UploadClient, UploadSession,
};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fraglens")]
#[command(about = "Upload gameplay clips and match screenshots for analysis", long_about = None)]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "FRAGLENS_BACKEND_URL")]
    backend: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file and print the report
    Upload {
        /// Video or screenshot to analyse
        input: PathBuf,

        /// Media kind: video (aim report) or image (match summary)
        #[arg(short, long, default_value = "video")]
        mode: MediaKind,

        /// Request AI insights after the report (image mode)
        #[arg(short, long)]
        analyze: bool,

        /// Do not send debug=true with video uploads
        #[arg(long)]
        no_debug: bool,

        /// Print the raw report JSON instead of stat boxes
        #[arg(long)]
        json: bool,
    },

    /// Request AI insights for a saved match summary or report
    Analyze {
        /// JSON file: a match summary, or a report containing one
        input: PathBuf,
    },

    /// Render a saved report without contacting the backend
    Inspect {
        /// Report JSON file
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let cli = Cli::parse();
    let config = match cli.backend {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::from_env(),
    };

    let result = match cli.command {
        Commands::Upload {
            input,
            mode,
            analyze,
            no_debug,
            json,
        } => cmd_upload(config.with_debug(!no_debug), &input, mode, analyze, json).await,

        Commands::Analyze { input } => cmd_analyze(config, &input).await,

        Commands::Inspect { input } => cmd_inspect(&input),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_upload(
    config: ClientConfig,
    input: &Path,
    mode: MediaKind,
    analyze: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Selected: {}", input.display());

    let file = LocalFile::open(input).await?;
    let mut session = UploadSession::new(mode);
    session.select_file(file)?;
    if let Some(file) = session.file() {
        eprintln!("   Type: {} ({} bytes)", file.mime(), file.size());
    }

    let client = UploadClient::new(config);
    eprintln!("📤 Uploading to {}", client.config().upload_url());

    client
        .submit(&mut session, |progress| {
            eprint!(
                "\r   {} {:<40}",
                render_progress_bar(progress.percent, 30),
                progress.status
            );
        })
        .await?;
    eprintln!();

    let Some(report) = session.report().cloned() else {
        let message = session.error().unwrap_or(mode.fallback_error());
        return Err(message.to_string().into());
    };
    eprintln!("✅ Report received");

    if analyze {
        if !mode.supports_analysis() {
            eprintln!("⚠️  AI insights are only available for screenshots (--mode image)");
        } else {
            eprintln!("🤖 Requesting AI insights...");
            if !client.request_analysis(&mut session).await {
                eprintln!("⚠️  No match summary in this report, skipping AI insights");
            }
        }
    }

    if json_output {
        let output = json!({
            "report": report,
            "insights": insights_json(session.insights()),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_text(&ReportView::from_report(&report)));
        print_insights(session.insights());
    }

    Ok(())
}

async fn cmd_analyze(config: ClientConfig, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("🤖 Analyzing: {}", input.display());

    let content = fs::read_to_string(input)?;
    let value: Value = serde_json::from_str(&content)?;
    let match_data = value.get("match_summary").cloned().unwrap_or(value);
    if !match_data.is_object() {
        return Err("expected a JSON object with the match summary".into());
    }

    let client = UploadClient::new(config);
    let outcome = client.analyze(&analysis_request(&match_data)).await;
    print_insights(&InsightsState::from(outcome));

    Ok(())
}

fn cmd_inspect(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(input)?;
    let report = Report::from_json(&content)?;
    print!("{}", render_text(&ReportView::from_report(&report)));
    Ok(())
}

fn print_insights(state: &InsightsState) {
    match state {
        InsightsState::Ready(items) if items.is_empty() => {
            println!("\n🤖 AI Insights\n   (no insights returned)");
        }
        InsightsState::Ready(items) => {
            println!("\n🤖 AI Insights");
            for (i, item) in items.iter().enumerate() {
                println!("   {}. {}", i + 1, item);
            }
        }
        InsightsState::Unavailable(msg) => println!("\nℹ️  {}", msg),
        InsightsState::Failed(msg) => println!("\n⚠️  {}", msg),
        InsightsState::NotRequested | InsightsState::Analyzing => {}
    }
}

fn insights_json(state: &InsightsState) -> Value {
    match state {
        InsightsState::Ready(items) => json!({ "status": "ready", "analysis": items }),
        InsightsState::Unavailable(msg) => json!({ "status": "unavailable", "message": msg }),
        InsightsState::Failed(msg) => json!({ "status": "failed", "message": msg }),
        InsightsState::NotRequested | InsightsState::Analyzing => Value::Null,
    }
}
