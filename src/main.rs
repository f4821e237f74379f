// SYNOID Catalog Entry Point
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use synoid_catalog::catalog::io_shield::write_catalog;
use synoid_catalog::catalog::source_tools::{check_ytdlp, find_ytdlp_command};
use synoid_catalog::catalog::{
    build_catalog, Catalog, PlaylistRegistry, VideoRecord, YtDlpCommand, YtDlpSource,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_OUTPUT: &str = "videos.json";

#[derive(Parser)]
#[command(name = "synoid-catalog")]
#[command(about = "SYNOID Lecture Catalog Builder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every registered playlist and write the catalog
    Build {
        /// Output JSON path (default: $SYNOID_CATALOG_OUTPUT or videos.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Registry JSON file (default: $SYNOID_CATALOG_REGISTRY or built-in subjects)
        #[arg(short, long)]
        registry: Option<PathBuf>,

        /// Browser to borrow cookies from for authentication
        #[arg(long)]
        login: Option<String>,

        /// yt-dlp command to use (default: $SYNOID_YTDLP or auto-detect)
        #[arg(long)]
        ytdlp: Option<String>,

        /// Give up on a single playlist after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// List registered subjects with their id prefixes
    Subjects {
        /// Registry JSON file
        #[arg(short, long)]
        registry: Option<PathBuf>,
    },

    /// Search a written catalog by subject and/or topic
    Query {
        /// Catalog JSON to read
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        subject: Option<String>,

        #[arg(short, long)]
        topic: Option<String>,
    },

    /// Check that yt-dlp is reachable
    Check {
        #[arg(long)]
        ytdlp: Option<String>,
    },
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty()).map(PathBuf::from)
}

fn load_registry(flag: Option<PathBuf>) -> Result<PlaylistRegistry> {
    match flag.or_else(|| env_path("SYNOID_CATALOG_REGISTRY")) {
        Some(path) => PlaylistRegistry::from_json_file(&path)
            .with_context(|| format!("Failed to load registry {}", path.display())),
        None => Ok(PlaylistRegistry::default()),
    }
}

async fn resolve_ytdlp(flag: Option<String>) -> YtDlpCommand {
    let explicit = flag.or_else(|| {
        std::env::var("SYNOID_YTDLP")
            .ok()
            .filter(|v| !v.trim().is_empty())
    });
    match explicit {
        Some(command) => YtDlpCommand::from_override(&command),
        None => find_ytdlp_command().await,
    }
}

async fn run_build(
    output: Option<PathBuf>,
    registry: Option<PathBuf>,
    login: Option<String>,
    ytdlp: Option<String>,
    timeout_secs: Option<u64>,
) -> Result<()> {
    let registry = load_registry(registry)?;
    let output = output
        .or_else(|| env_path("SYNOID_CATALOG_OUTPUT"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let source = YtDlpSource::new(resolve_ytdlp(ytdlp).await)
        .with_auth_browser(login)
        .with_timeout(timeout_secs.map(Duration::from_secs));

    let run = build_catalog(&registry, &source).await;

    write_catalog(&run.catalog, &output)
        .with_context(|| format!("Failed to write catalog to {}", output.display()))?;

    let failed: Vec<&str> = run.failed_subjects().collect();
    if !failed.is_empty() {
        warn!("⚠️ Subjects without videos this run: {}", failed.join(", "));
    }
    info!(
        "🎉 Successfully created {} with {} videos!",
        output.display(),
        run.catalog.videos.len()
    );
    Ok(())
}

fn run_query(input: &Path, subject: Option<&str>, topic: Option<&str>) -> Result<()> {
    let catalog = Catalog::load(input)
        .with_context(|| format!("Failed to read catalog {}", input.display()))?;

    let matches: Vec<&VideoRecord> = catalog.search(subject, topic).collect();

    println!("{}", serde_json::to_string_pretty(&matches)?);
    info!("{} of {} videos matched", matches.len(), catalog.videos.len());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("--- SYNOID CATALOG v{} ---", env!("CARGO_PKG_VERSION"));

    let args = Cli::parse();

    match args.command {
        Commands::Build {
            output,
            registry,
            login,
            ytdlp,
            timeout_secs,
        } => {
            run_build(output, registry, login, ytdlp, timeout_secs).await?;
        }
        Commands::Subjects { registry } => {
            let registry = load_registry(registry)?;
            for subject in registry.subjects() {
                println!("{:<4} {:<40} {}", subject.prefix(), subject.name, subject.locator);
            }
        }
        Commands::Query {
            input,
            subject,
            topic,
        } => {
            run_query(&input, subject.as_deref(), topic.as_deref())?;
        }
        Commands::Check { ytdlp } => {
            let command = resolve_ytdlp(ytdlp).await;
            if check_ytdlp(&command).await {
                println!("✅ yt-dlp available via '{}'", command.program());
            } else {
                bail!("yt-dlp is not available via '{}'", command.program());
            }
        }
    }

    Ok(())
}
