//! Page fetching module
//!
//! This module contains everything needed to turn a URL into a page body:
//! - HTTP fetching with bounded retries
//! - An on-disk page cache with per-origin expiry rules

pub mod cache;
mod fetcher;

pub use cache::PageCache;
pub use fetcher::{build_http_client, fetch_url, FetchResult, Fetcher};
