//! Content tree module
//!
//! This module defines the nodes handed to the packaging pipeline and writes
//! the finished tree as JSON.

mod nodes;

pub use nodes::{
    ChannelNode, ContentNode, FileRef, License, NodeMeta, TopicNode, VideoNode,
    MAX_CHANNEL_DESCRIPTION,
};

use crate::ChefError;
use std::path::Path;

/// Writes the channel tree to `path` as pretty-printed JSON
///
/// Parent directories are created as needed.
pub fn write_tree(path: &Path, channel: &ChannelNode) -> Result<(), ChefError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(channel)?;
    std::fs::write(path, json)?;

    tracing::info!("Content tree written to {}", path.display());
    Ok(())
}

/// Reads a tree previously written by [`write_tree`]
pub fn read_tree(path: &Path) -> Result<ChannelNode, ChefError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
