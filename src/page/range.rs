//! Section range selector
//!
//! Partial runs pick a contiguous block of homepage sections with a
//! `from:to` selector. Positions are 1-based and both ends are inclusive.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while parsing a selector
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("'{0}' is not a section number")]
    InvalidNumber(String),

    #[error("section numbers start at 1")]
    ZeroIndex,

    #[error("range start {start} is after range end {end}")]
    Reversed { start: usize, end: usize },

    #[error("expected 'from:to', got '{0}'")]
    TooManyParts(String),
}

/// Inclusive, 1-based range of section positions
///
/// | Selector | Sections |
/// |----------|----------|
/// | `""`, `":"` | all |
/// | `"3:"` | 3 to last |
/// | `":2"` | 1 and 2 |
/// | `"2:4"` | 2, 3, 4 |
/// | `"5"` | only 5 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRange {
    start: usize,
    end: Option<usize>,
}

impl Default for SectionRange {
    fn default() -> Self {
        Self::all()
    }
}

impl SectionRange {
    /// Every section
    pub fn all() -> Self {
        Self {
            start: 1,
            end: None,
        }
    }

    /// Sections `start..=end`; an absent end means "to the last section"
    pub fn new(start: usize, end: Option<usize>) -> Result<Self, RangeError> {
        if start == 0 || end == Some(0) {
            return Err(RangeError::ZeroIndex);
        }
        if let Some(end) = end {
            if start > end {
                return Err(RangeError::Reversed { start, end });
            }
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> Option<usize> {
        self.end
    }

    /// Whether the 1-based `position` is selected
    pub fn contains(&self, position: usize) -> bool {
        position >= self.start && self.end.map_or(true, |end| position <= end)
    }
}

impl FromStr for SectionRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parts: Vec<&str> = s.split(':').collect();

        match parts.as_slice() {
            [single] if single.is_empty() => Ok(Self::all()),
            [single] => {
                let position = parse_position(single)?;
                Self::new(position, Some(position))
            }
            [from, to] => {
                let start = if from.trim().is_empty() {
                    1
                } else {
                    parse_position(from)?
                };
                let end = if to.trim().is_empty() {
                    None
                } else {
                    Some(parse_position(to)?)
                };
                Self::new(start, end)
            }
            _ => Err(RangeError::TooManyParts(s.to_string())),
        }
    }
}

impl fmt::Display for SectionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) if end == self.start => write!(f, "{}", end),
            Some(end) => write!(f, "{}:{}", self.start, end),
            None => write!(f, "{}:", self.start),
        }
    }
}

fn parse_position(s: &str) -> Result<usize, RangeError> {
    let s = s.trim();
    s.parse::<usize>()
        .map_err(|_| RangeError::InvalidNumber(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(selector: &str, sections: usize) -> Vec<usize> {
        let range: SectionRange = selector.parse().unwrap();
        (1..=sections).filter(|i| range.contains(*i)).collect()
    }

    #[test]
    fn test_open_end() {
        assert_eq!(selected("3:", 8), vec![3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_open_start() {
        assert_eq!(selected(":2", 8), vec![1, 2]);
    }

    #[test]
    fn test_single_section() {
        assert_eq!(selected("5", 8), vec![5]);
    }

    #[test]
    fn test_closed_range() {
        assert_eq!(selected("2:4", 8), vec![2, 3, 4]);
    }

    #[test]
    fn test_everything() {
        assert_eq!(selected("", 3), vec![1, 2, 3]);
        assert_eq!(selected(":", 3), vec![1, 2, 3]);
        assert_eq!(SectionRange::default(), SectionRange::all());
    }

    #[test]
    fn test_range_past_the_end_selects_nothing_extra() {
        assert_eq!(selected("7:20", 8), vec![7, 8]);
        assert!(selected("9", 8).is_empty());
    }

    #[test]
    fn test_invalid_selectors() {
        assert_eq!(
            "a:3".parse::<SectionRange>(),
            Err(RangeError::InvalidNumber("a".to_string()))
        );
        assert_eq!("0".parse::<SectionRange>(), Err(RangeError::ZeroIndex));
        assert_eq!(
            "5:2".parse::<SectionRange>(),
            Err(RangeError::Reversed { start: 5, end: 2 })
        );
        assert!(matches!(
            "1:2:3".parse::<SectionRange>(),
            Err(RangeError::TooManyParts(_))
        ));
    }

    #[test]
    fn test_display_round_trips() {
        for selector in ["3:", "2:4", "5", "1:"] {
            let range: SectionRange = selector.parse().unwrap();
            assert_eq!(range.to_string(), selector);
        }
    }
}
