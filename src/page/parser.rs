//! Homepage parser
//!
//! Finds the section blocks of the homepage: every `div` with an
//! `h2.color-blue` child is one section.

use crate::fetch::Fetcher;
use crate::page::range::SectionRange;
use crate::page::section::Section;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

const SECTION_HEADING: &str = "div > h2.color-blue";

/// A fetched homepage
///
/// When the fetch failed the parser holds no document and yields no
/// sections.
pub struct PageParser {
    page_url: String,
    document: Option<Html>,
}

impl PageParser {
    /// Fetches `page_url` once and parses it
    pub async fn fetch(fetcher: &Fetcher, page_url: &str) -> Self {
        match fetcher.fetch(page_url).await {
            Some(body) => Self::from_html(page_url, &body),
            None => {
                tracing::warn!("Could not fetch {}, no sections will be produced", page_url);
                Self {
                    page_url: page_url.to_string(),
                    document: None,
                }
            }
        }
    }

    /// Parses an already fetched page
    pub fn from_html(page_url: &str, html: &str) -> Self {
        Self {
            page_url: page_url.to_string(),
            document: Some(Html::parse_document(html)),
        }
    }

    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    /// Whether a document was fetched
    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    /// Number of section blocks on the page
    pub fn section_count(&self) -> usize {
        self.section_blocks().len()
    }

    /// Sections selected by `range`, in document order
    ///
    /// Each section is extracted from its block only when the iterator
    /// reaches it.
    pub fn sections(&self, range: SectionRange) -> impl Iterator<Item = Section> + '_ {
        self.section_blocks()
            .into_iter()
            .enumerate()
            .filter(move |(index, _)| range.contains(index + 1))
            .map(|(_, block)| Section::from_element(block))
    }

    fn section_blocks(&self) -> Vec<ElementRef<'_>> {
        let (Some(document), Ok(selector)) = (&self.document, Selector::parse(SECTION_HEADING))
        else {
            return Vec::new();
        };

        // A block with two headings is still one section
        let mut seen = HashSet::new();
        document
            .select(&selector)
            .filter_map(|heading| heading.parent().and_then(ElementRef::wrap))
            .filter(|block| seen.insert(block.id()))
            .collect()
    }
}
