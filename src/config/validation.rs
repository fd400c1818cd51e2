use crate::config::types::{ChannelConfig, Config, FetchConfig, OutputConfig, VideoConfig};
use crate::ConfigError;
use url::Url;

const MAX_ATTEMPTS_LIMIT: u32 = 20;
const MIN_VIDEO_HEIGHT: u32 = 144;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_base_url(&config.site.base_url)?;
    validate_channel_config(&config.channel)?;
    validate_fetch_config(&config.fetch)?;
    validate_video_config(&config.video)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// The homepage must be an absolute http(s) URL
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            base_url
        )));
    }

    Ok(())
}

fn validate_channel_config(config: &ChannelConfig) -> Result<(), ConfigError> {
    let required = [
        ("channel.name", &config.name),
        ("channel.source-id", &config.source_id),
        ("channel.language", &config.language),
        ("channel.author", &config.author),
        ("channel.copyright-holder", &config.copyright_holder),
    ];

    for (key, value) in required {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", key)));
        }
    }

    Ok(())
}

fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    validate_attempts("fetch.max-attempts", config.max_attempts)?;

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "fetch.user-agent cannot be empty".to_string(),
        ));
    }

    if config.cache_dir.is_empty() {
        return Err(ConfigError::Validation(
            "fetch.cache-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_video_config(config: &VideoConfig) -> Result<(), ConfigError> {
    validate_attempts("video.max-attempts", config.max_attempts)?;

    if config.max_height < MIN_VIDEO_HEIGHT {
        return Err(ConfigError::Validation(format!(
            "video.max-height must be >= {}, got {}",
            MIN_VIDEO_HEIGHT, config.max_height
        )));
    }

    if config.backend.is_empty() {
        return Err(ConfigError::Validation(
            "video.backend cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.data_dir.is_empty() {
        return Err(ConfigError::Validation(
            "output.data-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_attempts(key: &str, attempts: u32) -> Result<(), ConfigError> {
    if attempts < 1 || attempts > MAX_ATTEMPTS_LIMIT {
        return Err(ConfigError::Validation(format!(
            "{} must be between 1 and {}, got {}",
            key, MAX_ATTEMPTS_LIMIT, attempts
        )));
    }
    Ok(())
}
