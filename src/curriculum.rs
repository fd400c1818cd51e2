//! Seventh-grade algebra syllabus
//!
//! One homepage section holds the algebra course as a flat list of videos.
//! This table routes each link, by its 1-based position in that list, into
//! one of eight syllabus topics.

use crate::tree::{NodeMeta, TopicNode};
use crate::ChefError;
use std::collections::HashMap;

/// Syllabus topics with the link positions they collect, in syllabus order
pub static CURRICULUM: [(&str, &[usize]); 8] = [
    ("طرق حل المسألة", &[1, 2, 3, 4, 16]),
    ("القوى والأسس", &[5, 6, 7, 8]),
    ("التربيع والجذر التربيعي", &[9, 10, 11]),
    ("ترتيب العمليات", &[12, 13, 14, 15]),
    ("المتغيرات والعبارات الجبرية", &[17, 18, 19, 20]),
    ("المعادلات الجبرية", &[21, 22]),
    ("خصائص الجبر", &[23, 24, 25, 26]),
    ("المتتابعات الحسابية", &[27, 28]),
];

/// Titles of the syllabus topics in order
pub fn titles() -> impl Iterator<Item = &'static str> {
    CURRICULUM.iter().map(|(title, _)| *title)
}

/// Flattens the table into position → topic title
pub fn index_map() -> HashMap<usize, &'static str> {
    CURRICULUM
        .iter()
        .flat_map(|(title, positions)| positions.iter().map(move |p| (*p, *title)))
        .collect()
}

/// Position → topic lookup built once per curriculum section
#[derive(Debug, Clone)]
pub struct CurriculumIndex {
    topics: HashMap<usize, &'static str>,
}

impl Default for CurriculumIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl CurriculumIndex {
    pub fn new() -> Self {
        Self {
            topics: index_map(),
        }
    }

    /// Topic title for a 1-based link position
    ///
    /// # Returns
    ///
    /// * `Ok(&str)` - The syllabus topic
    /// * `Err(ChefError::UnmappedCurriculumPosition)` - Position outside the table
    pub fn topic_for(&self, position: usize) -> Result<&'static str, ChefError> {
        self.topics
            .get(&position)
            .copied()
            .ok_or(ChefError::UnmappedCurriculumPosition { position })
    }
}

/// The eight empty syllabus topics, in order
pub fn nodes(meta: &NodeMeta) -> Vec<TopicNode> {
    titles().map(|title| TopicNode::new(title, "", meta)).collect()
}
