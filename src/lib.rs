//! Abdullaheid-Chef: a content ingestion tool for abdullaheid.net
//!
//! This crate walks the section blocks of the site homepage, downloads the
//! YouTube videos each section links to, and emits a JSON content tree
//! (channel, topics, videos) for the downstream packaging pipeline.

pub mod chef;
pub mod config;
pub mod curriculum;
pub mod fetch;
pub mod page;
pub mod tree;
pub mod video;

use thiserror::Error;

/// Main error type for chef operations
#[derive(Debug, Error)]
pub enum ChefError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Curriculum has no topic for link position {position}")]
    UnmappedCurriculumPosition { position: usize },

    #[error("Video backend error: {0}")]
    Backend(#[from] video::BackendError),

    #[error("Invalid section range: {0}")]
    Range(#[from] page::RangeError),

    #[error("Failed to serialize content tree: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for chef operations
pub type Result<T> = std::result::Result<T, ChefError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use chef::Chef;
pub use config::Config;
pub use page::{Section, SectionRange};
pub use tree::{ChannelNode, ContentNode, FileRef, License};
pub use video::{VideoBackend, YouTubeResource, YtDlp};
