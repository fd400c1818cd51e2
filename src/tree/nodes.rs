use crate::config::ChannelConfig;
use serde::{Deserialize, Serialize};

/// Longest channel description the packaging pipeline accepts
pub const MAX_CHANNEL_DESCRIPTION: usize = 400;

/// License record attached to every node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub license_id: String,
    pub copyright_holder: String,
    pub description: String,
}

impl License {
    pub const SPECIAL_PERMISSIONS: &'static str = "Special Permissions";

    /// Special-permissions license granted by `holder`
    pub fn special_permissions(holder: &str, description: &str) -> Self {
        Self {
            license_id: Self::SPECIAL_PERMISSIONS.to_string(),
            copyright_holder: holder.to_string(),
            description: description.to_string(),
        }
    }

    pub fn from_channel(channel: &ChannelConfig) -> Self {
        Self::special_permissions(&channel.copyright_holder, &channel.license_description)
    }
}

/// Metadata shared by every node of one channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeMeta {
    pub language: String,
    pub author: String,
    pub license: License,
}

impl NodeMeta {
    pub fn from_channel(channel: &ChannelConfig) -> Self {
        Self {
            language: channel.language.clone(),
            author: channel.author.clone(),
            license: License::from_channel(channel),
        }
    }
}

/// A file attached to a video node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "file_type")]
pub enum FileRef {
    #[serde(rename = "video")]
    VideoFile { path: String },

    #[serde(rename = "subtitles")]
    SubtitleFile { youtube_id: String, language: String },
}

/// Container node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicNode {
    pub source_id: String,
    pub title: String,
    pub description: String,
    pub language: String,
    pub author: String,
    pub license: License,
    pub children: Vec<ContentNode>,
}

impl TopicNode {
    /// Empty topic whose `source_id` is its title
    pub fn new(title: &str, description: &str, meta: &NodeMeta) -> Self {
        Self {
            source_id: title.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            language: meta.language.clone(),
            author: meta.author.clone(),
            license: meta.license.clone(),
            children: Vec::new(),
        }
    }
}

/// Leaf node referencing a downloaded video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoNode {
    /// Normalized video URL
    pub source_id: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub license: License,
    pub files: Vec<FileRef>,
}

/// One node of the content tree below the channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentNode {
    Topic(TopicNode),
    Video(VideoNode),
}

impl ContentNode {
    pub fn source_id(&self) -> &str {
        match self {
            Self::Topic(topic) => &topic.source_id,
            Self::Video(video) => &video.source_id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Topic(topic) => &topic.title,
            Self::Video(video) => &video.title,
        }
    }

    /// Children of a topic; videos have none
    pub fn children(&self) -> &[ContentNode] {
        match self {
            Self::Topic(topic) => &topic.children,
            Self::Video(_) => &[],
        }
    }
}

/// Root of the content tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelNode {
    pub source_domain: String,
    pub source_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub author: String,
    pub language: String,
    pub license: License,
    pub children: Vec<ContentNode>,
}

impl ChannelNode {
    /// Empty channel built from config; `hostname` is the site homepage
    pub fn new(channel: &ChannelConfig, hostname: &str) -> Self {
        Self {
            source_domain: hostname.to_string(),
            source_id: channel.source_id.clone(),
            title: channel.name.clone(),
            description: channel
                .description
                .chars()
                .take(MAX_CHANNEL_DESCRIPTION)
                .collect(),
            thumbnail: channel.thumbnail.clone(),
            author: channel.author.clone(),
            language: channel.language.clone(),
            license: License::from_channel(channel),
            children: Vec::new(),
        }
    }
}
