//! Homepage section blocks
//!
//! A section is one `div` holding an `h2.color-blue` heading, a description
//! paragraph, and an ordered list of video links. Each section becomes one
//! topic of the content tree.

use crate::curriculum::{self, CurriculumIndex};
use crate::tree::{ContentNode, NodeMeta, TopicNode};
use crate::video::{DownloadContext, YouTubeResource};
use scraper::{ElementRef, Selector};
use std::collections::HashSet;

/// Section titles whose links follow the algebra syllabus
pub const CURRICULUM_SECTIONS: &[&str] = &["رياضيات أول متوسط الفصل الأول"];

/// Title given to the curriculum section's topic node
pub const CURRICULUM_TITLE: &str = "رياضيات الصف السابع الأساسي: الجبر";

/// One entry of a section's link list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    /// Empty when the anchor has no `href`
    pub href: String,
}

impl Link {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

/// A parsed homepage section
#[derive(Debug, Clone)]
pub struct Section {
    title: String,
    description: String,
    links: Vec<Link>,
    nodes: Vec<ContentNode>,
}

impl Section {
    pub fn new(title: impl Into<String>, description: impl Into<String>, links: Vec<Link>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            links,
            nodes: Vec::new(),
        }
    }

    /// Extracts a section from its block element
    ///
    /// # Extraction Rules
    ///
    /// - Title: text of the first `h2`
    /// - Description: text of the first `p`
    /// - Links: `li > a` items of the first `ol` inside
    ///   `div.list-wrapper.clearfix`, in list order; items without an anchor
    ///   are skipped and a missing `href` becomes `""`
    pub fn from_element(element: ElementRef<'_>) -> Self {
        let title = first_text(element, "h2").unwrap_or_default();
        let description = first_text(element, "p").unwrap_or_default();
        let links = extract_links(element);

        Self::new(title, description, links)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// `(label, href)` pairs in list order
    pub fn links(&self) -> impl Iterator<Item = (&str, &str)> {
        self.links
            .iter()
            .map(|link| (link.label.as_str(), link.href.as_str()))
    }

    /// Nodes produced by the last [`Section::download`]
    pub fn nodes(&self) -> &[ContentNode] {
        &self.nodes
    }

    /// Whether this section is routed through the algebra syllabus
    pub fn is_curriculum(&self) -> bool {
        CURRICULUM_SECTIONS.contains(&self.title.as_str())
    }

    /// Downloads every linked video and builds the section's child nodes
    pub async fn download(&mut self, ctx: &DownloadContext<'_>, meta: &NodeMeta) {
        self.nodes = if self.is_curriculum() {
            self.download_curriculum(ctx, meta).await
        } else {
            self.download_generic(ctx, meta).await
        };
    }

    /// Routes link `i` into the syllabus topic the table assigns to it
    ///
    /// All eight topics are returned, including empty ones.
    async fn download_curriculum(
        &self,
        ctx: &DownloadContext<'_>,
        meta: &NodeMeta,
    ) -> Vec<ContentNode> {
        let mut topics = curriculum::nodes(meta);
        let index = CurriculumIndex::new();

        for (position, (label, href)) in (1..).zip(self.links()) {
            let name = format!("{}. {}", position, label);
            tracing::info!("  Title: {}", name);

            let topic_title = match index.topic_for(position) {
                Ok(title) => title,
                Err(e) => {
                    tracing::warn!("  Skipping '{}': {}", name, e);
                    continue;
                }
            };

            let mut youtube = YouTubeResource::new(href, Some(name), Some(self.title.clone()));
            youtube.download(ctx).await;

            if let Some(node) = youtube.to_node(meta) {
                if let Some(topic) = topics.iter_mut().find(|t| t.title == topic_title) {
                    topic.children.push(node);
                }
            }
        }

        topics.into_iter().map(ContentNode::Topic).collect()
    }

    /// Numbers videos in order, keeping the first node per `source_id`
    ///
    /// The counter only advances when a node is kept.
    async fn download_generic(
        &self,
        ctx: &DownloadContext<'_>,
        meta: &NodeMeta,
    ) -> Vec<ContentNode> {
        let mut nodes = Vec::new();
        let mut seen = HashSet::new();
        let mut counter = 1;

        for (label, href) in self.links() {
            let name = format!("{}. {}", counter, label);
            tracing::info!("  Title: {}", name);

            let mut youtube = YouTubeResource::new(href, Some(name), Some(self.title.clone()));
            if seen.contains(youtube.source_id()) {
                tracing::debug!("  Duplicate link {}", youtube.source_id());
                continue;
            }

            youtube.download(ctx).await;

            if let Some(node) = youtube.to_node(meta) {
                if seen.insert(node.source_id().to_string()) {
                    nodes.push(node);
                    counter += 1;
                }
            }
        }

        nodes
    }

    /// Builds the section's topic node
    pub fn to_node(&self, meta: &NodeMeta) -> ContentNode {
        let title = if self.is_curriculum() {
            CURRICULUM_TITLE
        } else {
            self.title.as_str()
        };

        let mut topic = TopicNode::new(title, &self.description, meta);
        topic.source_id = self.title.clone();
        topic.children = self.nodes.clone();
        ContentNode::Topic(topic)
    }
}

/// Trimmed text of the first element matching `css`
fn first_text(element: ElementRef<'_>, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    element
        .select(&selector)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
}

fn extract_links(element: ElementRef<'_>) -> Vec<Link> {
    let (Ok(list_selector), Ok(anchor_selector)) = (
        Selector::parse("div.list-wrapper.clearfix ol"),
        Selector::parse("a"),
    ) else {
        return Vec::new();
    };

    let Some(list) = element.select(&list_selector).next() else {
        return Vec::new();
    };

    list.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li")
        .filter_map(|item| item.select(&anchor_selector).next())
        .map(|anchor| {
            let label = anchor.text().collect::<String>().trim().to_string();
            let href = anchor.value().attr("href").unwrap_or("").trim();
            Link::new(label, href)
        })
        .collect()
}
