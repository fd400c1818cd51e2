//! One linked video and its download state

use crate::tree::{ContentNode, FileRef, NodeMeta, VideoNode};
use crate::video::backend::VideoInfo;
use crate::video::url::{is_watch_url, normalize_video_url};
use crate::video::DownloadContext;
use std::path::{Path, PathBuf};

/// A YouTube video linked from a section
#[derive(Debug, Clone)]
pub struct YouTubeResource {
    source_id: String,
    name: Option<String>,
    section_title: Option<String>,
    filepath: Option<PathBuf>,
    info: Option<VideoInfo>,
}

impl YouTubeResource {
    /// Wraps a raw link, normalizing it into the node `source_id`
    ///
    /// # Arguments
    ///
    /// * `url` - The href found on the page
    /// * `name` - Display title; the backend title is used when absent
    /// * `section_title` - Groups downloads into a per-section directory
    pub fn new(url: &str, name: Option<String>, section_title: Option<String>) -> Self {
        tracing::info!("    + Resource Type: Youtube");
        tracing::info!("    - URL: {}", url);

        Self {
            source_id: normalize_video_url(url),
            name,
            section_title,
            filepath: None,
            info: None,
        }
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Path of the downloaded MP4, once a non-empty file exists
    pub fn filepath(&self) -> Option<&Path> {
        self.filepath.as_deref()
    }

    /// Only single-video watch URLs are handed to the backend
    pub fn is_downloadable(&self) -> bool {
        is_watch_url(&self.source_id)
    }

    /// Directory the backend writes this video into
    pub fn download_dir(&self, base_path: &Path) -> PathBuf {
        let videos = base_path.join("videos");
        match &self.section_title {
            Some(title) => videos.join(sanitize_dir_name(title)),
            None => videos,
        }
    }

    /// Downloads the video through the backend
    ///
    /// Does nothing when downloads are disabled or the URL is not a single
    /// video. Transient backend failures and a missing output file are
    /// retried after `ctx.retry_delay`, up to `ctx.max_attempts` attempts.
    /// Terminal failures and zero-byte files end the download at once.
    pub async fn download(&mut self, ctx: &DownloadContext<'_>) {
        if !ctx.enabled || !self.is_downloadable() {
            return;
        }

        let download_to = self.download_dir(&ctx.base_path);
        if let Err(e) = tokio::fs::create_dir_all(&download_to).await {
            tracing::warn!("Cannot create {}: {}", download_to.display(), e);
            return;
        }

        for attempt in 1..=ctx.max_attempts {
            match ctx
                .backend
                .extract_info(&self.source_id, &download_to)
                .await
            {
                Ok(info) => {
                    tracing::info!(
                        "    + Video resolution: {}x{}",
                        dimension(info.width),
                        dimension(info.height)
                    );
                    let path = download_to.join(format!("{}.mp4", info.id));

                    match tokio::fs::metadata(&path).await {
                        Ok(meta) if meta.len() == 0 => {
                            tracing::info!("    + Empty file");
                            if let Err(e) = tokio::fs::remove_file(&path).await {
                                tracing::warn!(
                                    "Failed to remove empty file {}: {}",
                                    path.display(),
                                    e
                                );
                            }
                            return;
                        }
                        Ok(_) => {
                            self.filepath = Some(path);
                            self.info = Some(info);
                            return;
                        }
                        Err(e) => {
                            tracing::info!("{}: {}", path.display(), e);
                        }
                    }
                }
                Err(e) if e.is_transient() => {
                    tracing::info!("{}", e);
                }
                Err(e) => {
                    tracing::info!("     + An error occurred, the video may be unavailable: {}", e);
                    return;
                }
            }

            if attempt < ctx.max_attempts {
                tracing::info!("Download retry");
                tokio::time::sleep(ctx.retry_delay).await;
            }
        }

        tracing::warn!(
            "Giving up on {} after {} attempts",
            self.source_id,
            ctx.max_attempts
        );
    }

    /// One subtitle descriptor per language the backend reported
    ///
    /// Read from the same info dump as the download, so no second backend
    /// call is made.
    pub fn subtitles(&self) -> Vec<FileRef> {
        let Some(info) = &self.info else {
            return Vec::new();
        };

        info.subtitle_languages()
            .map(|language| FileRef::SubtitleFile {
                youtube_id: info.id.clone(),
                language: language.to_string(),
            })
            .collect()
    }

    /// Builds the Video node, if a file was retrieved
    pub fn to_node(&self, meta: &NodeMeta) -> Option<ContentNode> {
        let path = self.filepath.as_ref()?;

        let title = self
            .name
            .clone()
            .or_else(|| self.info.as_ref().map(|info| info.title.clone()))
            .unwrap_or_default();

        let mut files = vec![FileRef::VideoFile {
            path: path.to_string_lossy().into_owned(),
        }];
        files.extend(self.subtitles());

        Some(ContentNode::Video(VideoNode {
            source_id: self.source_id.clone(),
            title,
            description: String::new(),
            author: meta.author.clone(),
            language: meta.language.clone(),
            license: meta.license.clone(),
            files,
        }))
    }
}

fn dimension(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Keeps section titles from escaping the videos directory
fn sanitize_dir_name(title: &str) -> String {
    let cleaned: String = title
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}
