//! Integration tests for the chef
//!
//! These tests use wiremock to serve a homepage and a fake video backend
//! to stand in for yt-dlp, then check the content tree end-to-end.

use abdullaheid_chef::config::Config;
use abdullaheid_chef::fetch::Fetcher;
use abdullaheid_chef::tree::read_tree;
use abdullaheid_chef::video::{BackendError, VideoBackend, VideoInfo};
use abdullaheid_chef::{Chef, ContentNode, FileRef, SectionRange};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Writes `<id>.mp4` for every `watch?v=<id>`; ids starting with "empty"
/// produce zero-byte files and ids starting with "gone" fail terminally
#[derive(Default)]
struct FakeBackend {
    calls: AtomicUsize,
}

impl FakeBackend {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoBackend for FakeBackend {
    async fn extract_info(
        &self,
        url: &str,
        download_to: &Path,
    ) -> Result<VideoInfo, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let id = url.rsplit("v=").next().unwrap_or_default().to_string();

        if id.starts_with("gone") {
            return Err(BackendError::Terminal("Video unavailable".to_string()));
        }

        let bytes: &[u8] = if id.starts_with("empty") { b"" } else { b"mp4" };
        std::fs::write(download_to.join(format!("{}.mp4", id)), bytes).unwrap();

        let mut subtitles = BTreeMap::new();
        subtitles.insert("ar".to_string(), serde_json::Value::Null);
        Ok(VideoInfo {
            id: id.clone(),
            title: format!("Backend {}", id),
            width: Some(854),
            height: Some(480),
            subtitles,
        })
    }
}

fn homepage() -> String {
    let mut curriculum_items = String::new();
    for i in 1..=6 {
        curriculum_items.push_str(&format!(
            r#"<li><a href="https://www.youtube.com/embed/m{}?rel=0">درس {}</a></li>"#,
            i, i
        ));
    }

    format!(
        r#"<html><body>
        <div class="col">
            <h2 class="color-blue">Java</h2>
            <p>Java programming course</p>
            <div class="list-wrapper clearfix"><ol>
                <li><a href="https://www.youtube.com/watch?v=j1">Intro</a></li>
                <li><a href="https://www.youtube.com/watch?v=j1/">Intro (again)</a></li>
                <li><a href="https://www.youtube.com/watch?v=empty1">Broken upload</a></li>
                <li><a href="https://www.youtube.com/watch?v=gone1">Removed</a></li>
                <li><a href="https://www.youtube.com/watch?v=j2">Classes</a></li>
            </ol></div>
        </div>
        <div class="col">
            <h2 class="color-blue">رياضيات أول متوسط الفصل الأول</h2>
            <p>Algebra</p>
            <div class="list-wrapper clearfix"><ol>{}</ol></div>
        </div>
        <div class="col">
            <h2 class="color-blue">HTML</h2>
            <p>HTML course</p>
            <div class="list-wrapper clearfix"><ol>
                <li><a href="https://www.youtube.com/user/abdullaheid">Channel</a></li>
            </ol></div>
        </div>
        </body></html>"#,
        curriculum_items
    )
}

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, work: &Path) -> Config {
    let mut config = Config::default();
    config.site.base_url = format!("{}/", base_url);
    config.fetch.retry_delay_ms = 1;
    config.fetch.cache_dir = work.join("cache").to_string_lossy().into_owned();
    config.video.retry_delay_ms = 1;
    config.output.data_dir = work.join("chefdata").to_string_lossy().into_owned();
    config
}

async fn serve_homepage(mock_server: &MockServer, times: u64) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(homepage()))
        .expect(times)
        .mount(mock_server)
        .await;
}

fn titles(nodes: &[ContentNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.title()).collect()
}

#[tokio::test]
async fn test_full_run_builds_tree() {
    let mock_server = MockServer::start().await;
    serve_homepage(&mock_server, 1).await;

    let work = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), work.path());
    let tree_path = config.output.tree_path();
    let backend = FakeBackend::default();

    let chef = Chef::new(config, &backend).expect("Failed to create chef");
    let channel = chef.run(SectionRange::all()).await.expect("Run failed");

    assert_eq!(channel.source_id, "sushi-chef-abdulla-eid-network-ar");
    assert_eq!(
        titles(&channel.children),
        vec!["Java", "رياضيات الصف السابع الأساسي: الجبر", "HTML"]
    );

    // Duplicates, empty files and unavailable videos leave no node
    let java = &channel.children[0];
    assert_eq!(titles(java.children()), vec!["1. Intro", "2. Classes"]);
    let ContentNode::Video(intro) = &java.children()[0] else {
        panic!("expected a video");
    };
    assert_eq!(intro.source_id, "https://www.youtube.com/watch?v=j1");
    assert!(intro.files.contains(&FileRef::SubtitleFile {
        youtube_id: "j1".to_string(),
        language: "ar".to_string(),
    }));

    // Positions 1-4 and 5-6 land in the first two syllabus topics
    let algebra = &channel.children[1];
    assert_eq!(algebra.source_id(), "رياضيات أول متوسط الفصل الأول");
    assert_eq!(algebra.children().len(), 8);
    assert_eq!(algebra.children()[0].children().len(), 4);
    assert_eq!(
        titles(algebra.children()[1].children()),
        vec!["5. درس 5", "6. درس 6"]
    );
    let ContentNode::Video(lesson) = &algebra.children()[0].children()[0] else {
        panic!("expected a video");
    };
    assert_eq!(lesson.source_id, "https://www.youtube.com/watch?v=m1");

    // Channel links are never handed to the backend
    assert!(channel.children[2].children().is_empty());

    // Java: j1, empty1, gone1, j2 (duplicate skipped); algebra: 6
    assert_eq!(backend.calls(), 10);

    let written = read_tree(&tree_path).expect("Tree not written");
    assert_eq!(written, channel);

    let video_path = work
        .path()
        .join("chefdata")
        .join("abdullah_videos")
        .join("videos")
        .join("Java")
        .join("j1.mp4");
    assert!(video_path.exists());
}

#[tokio::test]
async fn test_download_disabled_still_walks_sections() {
    let mock_server = MockServer::start().await;
    serve_homepage(&mock_server, 1).await;

    let work = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server.uri(), work.path());
    config.video.enabled = false;
    let backend = FakeBackend::default();

    let chef = Chef::new(config, &backend).unwrap();
    let channel = chef.run(SectionRange::all()).await.unwrap();

    assert_eq!(backend.calls(), 0);
    assert_eq!(channel.children.len(), 3);
    assert!(channel.children[0].children().is_empty());
    assert_eq!(channel.children[1].children().len(), 8);
    assert!(channel.children[1]
        .children()
        .iter()
        .all(|topic| topic.children().is_empty()));
}

#[tokio::test]
async fn test_section_range() {
    let mock_server = MockServer::start().await;
    serve_homepage(&mock_server, 1).await;

    let work = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), work.path());
    let backend = FakeBackend::default();

    let chef = Chef::new(config, &backend).unwrap();
    let channel = chef.scrape("3".parse().unwrap()).await;

    assert_eq!(titles(&channel.children), vec!["HTML"]);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_unreachable_homepage_gives_empty_channel() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(4)
        .mount(&mock_server)
        .await;

    let work = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), work.path());
    let backend = FakeBackend::default();

    let chef = Chef::new(config, &backend).unwrap();
    let channel = chef.run(SectionRange::all()).await.unwrap();

    assert!(channel.children.is_empty());
}

#[tokio::test]
async fn test_homepage_is_served_from_cache() {
    let mock_server = MockServer::start().await;
    serve_homepage(&mock_server, 1).await;

    let work = TempDir::new().unwrap();
    let backend = FakeBackend::default();

    for _ in 0..2 {
        let mut config = create_test_config(&mock_server.uri(), work.path());
        config.video.enabled = false;
        let chef = Chef::new(config, &backend).unwrap();
        let channel = chef.scrape(SectionRange::all()).await;
        assert_eq!(channel.children.len(), 3);
    }
}

#[tokio::test]
async fn test_fetcher_retries_transient_failures() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let work = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), work.path());
    let fetcher = Fetcher::new(&config.fetch, &config.site.base_url).unwrap();

    let body = fetcher.fetch(&format!("{}/page", mock_server.uri())).await;
    assert_eq!(body, Some("ok".to_string()));
}
