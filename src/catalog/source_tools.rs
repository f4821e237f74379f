// SYNOID Catalog - Source Tools (Playlist Extraction)
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// This module handles:
// 1. The `PlaylistSource` seam the pipeline fetches through
// 2. Locating a usable yt-dlp (standalone binary or python module)
// 3. Flat playlist listing via `yt-dlp --flat-playlist -J`

use serde::Deserialize;
use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Failure of one whole playlist listing. Never partial.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("invalid playlist locator '{locator}': {reason}")]
    InvalidLocator { locator: String, reason: String },
    #[error("failed to launch '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("yt-dlp exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("yt-dlp returned malformed playlist JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("playlist listing timed out after {0:?}")]
    TimedOut(Duration),
}

/// Shallow per-entry metadata as yielded by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawVideoRecord {
    pub id: Option<String>,
    pub title: Option<String>,
    /// Whole seconds.
    pub duration: Option<u64>,
}

impl RawVideoRecord {
    pub fn new(id: Option<&str>, title: Option<&str>, duration: Option<u64>) -> Self {
        Self {
            id: id.map(str::to_string),
            title: title.map(str::to_string),
            duration,
        }
    }
}

/// Anything that can list a playlist's entries in order.
pub trait PlaylistSource {
    fn fetch(
        &self,
        locator: &str,
    ) -> impl Future<Output = Result<Vec<RawVideoRecord>, ExtractionError>> + Send;
}

// ---------------------------------------------------------------------------
// yt-dlp discovery
// ---------------------------------------------------------------------------

/// How yt-dlp gets invoked on this machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YtDlpCommand {
    /// A `yt-dlp` executable.
    Standalone(String),
    /// A python interpreter with the `yt_dlp` module (`python -m yt_dlp`).
    PythonModule(String),
}

impl YtDlpCommand {
    /// Interpret a user supplied command (CLI flag or `SYNOID_YTDLP`).
    ///
    /// Any executable named like a yt-dlp release (`yt-dlp`, `yt-dlp.exe`,
    /// `yt-dlp_linux`, `yt-dlp_macos`, ...) runs directly; anything else is
    /// treated as a python interpreter.
    pub fn from_override(command: &str) -> Self {
        let command = command.trim();
        let stem = Path::new(command)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        if stem.starts_with("yt-dlp") || stem.starts_with("yt_dlp") {
            YtDlpCommand::Standalone(command.to_string())
        } else {
            YtDlpCommand::PythonModule(command.to_string())
        }
    }

    pub fn program(&self) -> &str {
        match self {
            YtDlpCommand::Standalone(bin) => bin,
            YtDlpCommand::PythonModule(python) => python,
        }
    }

    fn leading_args(&self) -> Vec<String> {
        match self {
            YtDlpCommand::Standalone(_) => Vec::new(),
            YtDlpCommand::PythonModule(_) => vec!["-m".to_string(), "yt_dlp".to_string()],
        }
    }
}

async fn runs_ok(program: &str, args: &[&str]) -> bool {
    Command::new(program)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Find a working yt-dlp: standalone binaries first, then python interpreters
/// that have the module installed. Falls back to plain `yt-dlp` so the
/// failure surfaces per subject as a launch error.
pub async fn find_ytdlp_command() -> YtDlpCommand {
    for bin in ["yt-dlp", "/usr/bin/yt-dlp", "/usr/local/bin/yt-dlp"] {
        if runs_ok(bin, &["--version"]).await {
            info!("[SOURCE] Found standalone 'yt-dlp' at '{}'", bin);
            return YtDlpCommand::Standalone(bin.to_string());
        }
        debug!("[SOURCE] '{}' not usable", bin);
    }

    for python in ["python3", "python", "py"] {
        if runs_ok(python, &["-m", "yt_dlp", "--version"]).await {
            info!("[SOURCE] Found python with yt-dlp module: '{}'", python);
            return YtDlpCommand::PythonModule(python.to_string());
        }
        debug!("[SOURCE] '{}' has no yt_dlp module", python);
    }

    warn!("[SOURCE] No working yt-dlp found; every playlist fetch will fail");
    YtDlpCommand::Standalone("yt-dlp".to_string())
}

/// Check if yt-dlp is installed and accessible.
pub async fn check_ytdlp(command: &YtDlpCommand) -> bool {
    let mut args = command.leading_args();
    args.push("--version".to_string());
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    runs_ok(command.program(), &args).await
}

// ---------------------------------------------------------------------------
// Flat playlist listing
// ---------------------------------------------------------------------------

fn build_flat_playlist_args(
    command: &YtDlpCommand,
    locator: &str,
    auth_browser: Option<&str>,
) -> Result<Vec<String>, ExtractionError> {
    let mut args = command.leading_args();

    args.extend_from_slice(&[
        "--flat-playlist".to_string(),
        "-J".to_string(),
        "--no-warnings".to_string(),
    ]);

    if let Some(browser) = auth_browser {
        if browser.starts_with('-') {
            return Err(ExtractionError::InvalidLocator {
                locator: locator.to_string(),
                reason: format!("browser name '{}' cannot start with '-'", browser),
            });
        }
        args.push("--cookies-from-browser".to_string());
        args.push(browser.to_string());
    }

    args.push("--".to_string());
    args.push(locator.to_string());

    Ok(args)
}

#[derive(Debug, Deserialize)]
struct FlatPlaylist {
    #[serde(default)]
    entries: Vec<Option<FlatEntry>>,
}

#[derive(Debug, Deserialize)]
struct FlatEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
}

impl From<FlatEntry> for RawVideoRecord {
    fn from(entry: FlatEntry) -> Self {
        let duration = entry
            .duration
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map(|secs| secs.trunc() as u64);
        Self {
            id: entry.id,
            title: entry.title,
            duration,
        }
    }
}

/// Parse the single JSON document `yt-dlp -J --flat-playlist` prints.
pub fn parse_flat_playlist(stdout: &[u8]) -> Result<Vec<RawVideoRecord>, ExtractionError> {
    let playlist: FlatPlaylist = serde_json::from_slice(stdout)?;
    Ok(playlist
        .entries
        .into_iter()
        .flatten()
        .map(RawVideoRecord::from)
        .collect())
}

/// `PlaylistSource` backed by a local yt-dlp process per playlist.
#[derive(Debug, Clone)]
pub struct YtDlpSource {
    command: YtDlpCommand,
    auth_browser: Option<String>,
    timeout: Option<Duration>,
}

impl YtDlpSource {
    pub fn new(command: YtDlpCommand) -> Self {
        Self {
            command,
            auth_browser: None,
            timeout: None,
        }
    }

    /// Borrow cookies from a browser profile for private/age-gated playlists.
    pub fn with_auth_browser(mut self, browser: Option<String>) -> Self {
        self.auth_browser = browser;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn list(&self, locator: &str) -> Result<Vec<RawVideoRecord>, ExtractionError> {
        let args = build_flat_playlist_args(&self.command, locator, self.auth_browser.as_deref())?;
        let program = self.command.program();
        debug!("[SOURCE] {} {}", program, args.join(" "));

        let mut cmd = Command::new(program);
        cmd.args(&args).stdin(Stdio::null()).kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| ExtractionError::TimedOut(limit))?,
            None => cmd.output().await,
        }
        .map_err(|source| ExtractionError::Launch {
            command: program.to_string(),
            source,
        })?;

        if !output.status.success() {
            return Err(ExtractionError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_flat_playlist(&output.stdout)
    }
}

impl PlaylistSource for YtDlpSource {
    fn fetch(
        &self,
        locator: &str,
    ) -> impl Future<Output = Result<Vec<RawVideoRecord>, ExtractionError>> + Send {
        self.list(locator)
    }
}
