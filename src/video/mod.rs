//! Video module
//!
//! This module turns linked YouTube URLs into downloaded files and Video
//! nodes:
//! - URL normalization
//! - The extractor backend seam and its `yt-dlp` implementation
//! - The per-video retry loop

mod backend;
mod resource;
mod url;

pub use backend::{classify_failure, parse_info, BackendError, VideoBackend, VideoInfo, YtDlp};
pub use resource::YouTubeResource;
pub use self::url::{is_embed, is_watch_url, normalize_video_url, transform_embed};

use crate::config::VideoConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Everything a download needs, threaded from the chef down to each video
#[derive(Clone)]
pub struct DownloadContext<'a> {
    /// When false, pages are walked but nothing is downloaded
    pub enabled: bool,

    /// Root under which `videos/<section>/` directories are created
    pub base_path: PathBuf,

    pub backend: &'a dyn VideoBackend,

    pub max_attempts: u32,

    pub retry_delay: Duration,
}

impl<'a> DownloadContext<'a> {
    pub fn new(config: &VideoConfig, base_path: PathBuf, backend: &'a dyn VideoBackend) -> Self {
        Self {
            enabled: config.enabled,
            base_path,
            backend,
            max_attempts: config.max_attempts,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }
}
