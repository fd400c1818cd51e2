//! YouTube URL handling

/// Marker present in every canonical watch URL
pub const WATCH_MARKER: &str = "watch?";

/// Path fragments of channel and user pages, which are never downloaded
const CHANNEL_MARKERS: &[&str] = &["/user/", "/c/", "/channel/"];

/// Normalizes a video URL into the form used as `source_id`
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Embed URLs: drop the query string and rewrite `embed/` to `watch?v=`
/// 3. Strip every trailing slash (and any whitespace between them)
///
/// Applying it twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use abdullaheid_chef::video::normalize_video_url;
///
/// assert_eq!(
///     normalize_video_url("https://www.youtube.com/embed/abc123?x=1"),
///     "https://www.youtube.com/watch?v=abc123"
/// );
/// ```
pub fn normalize_video_url(url: &str) -> String {
    let url = url.trim();

    if is_embed(url) {
        return strip_trailing_slashes(&transform_embed(url));
    }

    strip_trailing_slashes(url)
}

fn strip_trailing_slashes(url: &str) -> String {
    url.trim_end_matches(|c: char| c == '/' || c.is_whitespace())
        .to_string()
}

/// True for `.../embed/<id>` player URLs
pub fn is_embed(url: &str) -> bool {
    url.contains("embed/")
}

/// Rewrites an embed URL into a watch URL, dropping its query string
pub fn transform_embed(url: &str) -> String {
    let base = url.split('?').next().unwrap_or_default();
    base.replace("embed/", "watch?v=").trim().to_string()
}

/// True when the URL names a single watchable video
pub fn is_watch_url(url: &str) -> bool {
    url.contains(WATCH_MARKER) && !CHANNEL_MARKERS.iter().any(|m| url.contains(m))
}
