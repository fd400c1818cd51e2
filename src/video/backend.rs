//! Video extraction backend
//!
//! The chef never talks to YouTube itself. It hands a watch URL to an
//! extractor and reads back the extractor's metadata for the video. The
//! production backend runs the `yt-dlp` executable; tests plug in fakes.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Stderr fragments that mark a failure worth retrying
const TRANSIENT_MARKERS: &[&str] = &[
    "Connection reset",
    "timed out",
    "Temporary failure in name resolution",
    "Remote end closed connection",
    "IncompleteRead",
];

/// Backend failures, split by whether another attempt can help
#[derive(Debug, Error)]
pub enum BackendError {
    /// Local I/O trouble, reset connections, unreadable backend output
    #[error("transient backend failure: {0}")]
    Transient(String),

    /// The backend declared the video unavailable or undownloadable
    #[error("backend could not retrieve the video: {0}")]
    Terminal(String),
}

impl BackendError {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// Metadata reported by the backend for one video
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VideoInfo {
    /// Backend identifier; downloaded files are named after it
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub height: Option<u32>,

    /// Subtitle tracks keyed by language code
    #[serde(default)]
    pub subtitles: BTreeMap<String, serde_json::Value>,
}

impl VideoInfo {
    /// Languages with a subtitle track, in sorted order
    pub fn subtitle_languages(&self) -> impl Iterator<Item = &str> {
        self.subtitles.keys().map(String::as_str)
    }
}

/// An external video extractor
#[async_trait]
pub trait VideoBackend: Send + Sync {
    /// Downloads `url` into `download_to` as `<id>.mp4` and returns its
    /// metadata
    async fn extract_info(&self, url: &str, download_to: &Path) -> Result<VideoInfo, BackendError>;
}

/// Backend driving the `yt-dlp` command line tool
#[derive(Debug, Clone)]
pub struct YtDlp {
    executable: String,
    max_height: u32,
}

impl YtDlp {
    pub fn new(executable: impl Into<String>, max_height: u32) -> Self {
        Self {
            executable: executable.into(),
            max_height,
        }
    }

    /// Best video and audio no taller than `max_height`, as a single MP4
    pub fn format(&self) -> String {
        format!(
            "bestvideo[height<={h}][ext=mp4]+bestaudio[ext=m4a]/best[height<={h}][ext=mp4]",
            h = self.max_height
        )
    }

    /// Command line arguments for one invocation
    pub fn args(&self, url: &str, download_to: &Path) -> Vec<String> {
        vec![
            "--dump-single-json".into(),
            "--no-warnings".into(),
            "--restrict-filenames".into(),
            "--continue".into(),
            "--format".into(),
            self.format(),
            "--merge-output-format".into(),
            "mp4".into(),
            "--no-simulate".into(),
            "--output".into(),
            format!("{}/%(id)s.%(ext)s", download_to.display()),
            "--".into(),
            url.to_string(),
        ]
    }
}

#[async_trait]
impl VideoBackend for YtDlp {
    async fn extract_info(
        &self,
        url: &str,
        download_to: &Path,
    ) -> Result<VideoInfo, BackendError> {
        let output = tokio::process::Command::new(&self.executable)
            .args(self.args(url, download_to))
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => BackendError::Terminal(format!(
                    "{} executable not found",
                    self.executable
                )),
                _ => BackendError::Transient(e.to_string()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(&stderr));
        }

        parse_info(&output.stdout)
    }
}

/// Maps a failed run's stderr onto a retry decision
pub fn classify_failure(stderr: &str) -> BackendError {
    let message = stderr
        .lines()
        .rev()
        .find(|line| line.starts_with("ERROR:"))
        .unwrap_or_else(|| stderr.trim())
        .to_string();

    if TRANSIENT_MARKERS.iter().any(|m| stderr.contains(m)) {
        BackendError::Transient(message)
    } else {
        BackendError::Terminal(message)
    }
}

/// Parses the JSON info dump printed on stdout
pub fn parse_info(stdout: &[u8]) -> Result<VideoInfo, BackendError> {
    serde_json::from_slice(stdout)
        .map_err(|e| BackendError::Transient(format!("unreadable backend output: {}", e)))
}
