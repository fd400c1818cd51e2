//! Homepage module
//!
//! This module turns the fetched homepage into sections:
//! - Locating section blocks and selecting a range of them
//! - Extracting each section's title, description and links
//! - Routing a section's videos into topic nodes

mod parser;
mod range;
mod section;

pub use parser::PageParser;
pub use range::{RangeError, SectionRange};
pub use section::{Link, Section, CURRICULUM_SECTIONS, CURRICULUM_TITLE};
