use serde::Deserialize;

/// Main configuration structure for the chef
///
/// Every table is optional; missing tables and keys fall back to the values
/// used for the abdullaheid.net channel.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub channel: ChannelConfig,
    pub fetch: FetchConfig,
    pub video: VideoConfig,
    pub output: OutputConfig,
}

/// Source site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Homepage holding the section blocks; also the origin cached forever
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://www.abdullaheid.net/".to_string(),
        }
    }
}

/// Channel metadata written at the root of the content tree
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub name: String,

    #[serde(rename = "source-id")]
    pub source_id: String,

    pub language: String,

    /// Truncated to 400 characters in the tree
    pub description: String,

    pub thumbnail: String,

    pub author: String,

    #[serde(rename = "copyright-holder")]
    pub copyright_holder: String,

    #[serde(rename = "license-description")]
    pub license_description: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            name: "Abdulla Eid Network (العربيّة)".to_string(),
            source_id: "sushi-chef-abdulla-eid-network-ar".to_string(),
            language: "ar".to_string(),
            description: "Abdullah Eid Network provides programming and coding courses on Java, \
                Javascript DOM, Android, HTML, XMind, MySQL, PHP, Ajax, ASP.Net MVC. The last \
                course this channel provides is on Algebra for 7th grade."
                .to_string(),
            thumbnail: "abdullahed_logo.jpg".to_string(),
            author: "Abdullah Eid".to_string(),
            copyright_holder: "Abdullah Eid Educational Network".to_string(),
            license_description: "الحقوق متاحة لجميع الناس لغير الأغراض التجارية".to_string(),
        }
    }
}

/// Page fetching configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Number of GET attempts per page
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Pause after a connection error before the next attempt (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,

    /// Directory holding cached page bodies
    #[serde(rename = "cache-dir")]
    pub cache_dir: String,

    /// Lifetime of cached pages outside the site origin (seconds)
    #[serde(rename = "cache-ttl-secs")]
    pub cache_ttl_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("abdullaheid-chef/{}", env!("CARGO_PKG_VERSION")),
            max_attempts: 4,
            retry_delay_ms: 3000,
            cache_dir: ".webcache".to_string(),
            cache_ttl_secs: 3600,
        }
    }
}

/// Video download configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// When false the page is still walked but nothing is downloaded
    pub enabled: bool,

    /// Highest video resolution requested from the backend
    #[serde(rename = "max-height")]
    pub max_height: u32,

    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,

    /// Path or name of the yt-dlp executable
    pub backend: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_height: 480,
            max_attempts: 4,
            retry_delay_ms: 800,
            backend: "yt-dlp".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory for downloaded videos and the content tree
    #[serde(rename = "data-dir")]
    pub data_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: "chefdata".to_string(),
        }
    }
}

impl OutputConfig {
    /// Where the JSON content tree is written
    pub fn tree_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.data_dir)
            .join("trees")
            .join("ricecooker_json_tree.json")
    }

    /// Base directory for downloaded videos
    pub fn videos_base(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.data_dir).join("abdullah_videos")
    }
}
