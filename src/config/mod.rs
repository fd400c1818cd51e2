//! Configuration module for the chef
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use abdullaheid_chef::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("chef.toml")).unwrap();
//! println!("Homepage: {}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ChannelConfig, Config, FetchConfig, OutputConfig, SiteConfig, VideoConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
