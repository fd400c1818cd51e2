//! Chef - main ingestion orchestration logic
//!
//! This module drives a run from homepage to content tree:
//! - Fetching and parsing the homepage
//! - Downloading each selected section's videos
//! - Assembling the channel tree
//! - Writing the tree for the packaging pipeline

use crate::config::Config;
use crate::fetch::Fetcher;
use crate::page::{PageParser, SectionRange};
use crate::tree::{write_tree, ChannelNode, NodeMeta};
use crate::video::{DownloadContext, VideoBackend};
use crate::ChefError;
use std::time::Instant;

/// Main chef structure
pub struct Chef<'a> {
    config: Config,
    fetcher: Fetcher,
    backend: &'a dyn VideoBackend,
}

impl<'a> Chef<'a> {
    /// Creates a new chef
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration
    /// * `backend` - Video extractor used for every download
    pub fn new(config: Config, backend: &'a dyn VideoBackend) -> Result<Self, ChefError> {
        let fetcher = Fetcher::new(&config.fetch, &config.site.base_url)?;

        Ok(Self {
            config,
            fetcher,
            backend,
        })
    }

    /// Builds the channel tree for the sections selected by `range`
    ///
    /// A homepage that cannot be fetched gives a channel with no children.
    pub async fn scrape(&self, range: SectionRange) -> ChannelNode {
        let base_url = &self.config.site.base_url;
        let mut channel = ChannelNode::new(&self.config.channel, base_url);
        let meta = NodeMeta::from_channel(&self.config.channel);

        let ctx = DownloadContext::new(
            &self.config.video,
            self.config.output.videos_base(),
            self.backend,
        );
        if !ctx.enabled {
            tracing::info!("Video downloads disabled, only the page structure will be walked");
        }

        let parser = PageParser::fetch(&self.fetcher, base_url).await;
        tracing::info!(
            "Found {} sections on {}, processing {}",
            parser.section_count(),
            parser.page_url(),
            range
        );

        for mut section in parser.sections(range) {
            tracing::info!("* Section: {}", section.title());
            section.download(&ctx, &meta).await;
            channel.children.push(section.to_node(&meta));
        }

        channel
    }

    /// Scrapes and writes the tree to the configured path
    pub async fn run(&self, range: SectionRange) -> Result<ChannelNode, ChefError> {
        let start_time = Instant::now();

        let channel = self.scrape(range).await;
        write_tree(&self.config.output.tree_path(), &channel)?;

        tracing::info!(
            "Run completed: {} sections in {:?}",
            channel.children.len(),
            start_time.elapsed()
        );

        Ok(channel)
    }
}
