use std::ops::Range;

use serde::Serialize;

/// Lines of a features descriptor that belong to the selected `<feature>` block.
///
/// Stored half-open; a feature with no lines between its start and end tags
/// yields an empty range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureRange {
    first: usize,
    end: usize,
}

impl FeatureRange {
    /// Range covering `first..=last`. `last` may be `first - 1` for an empty block.
    #[must_use]
    pub fn inclusive(first: usize, last: Option<usize>) -> Self {
        let end = last.map_or(first, |last| (last + 1).max(first));
        Self { first, end }
    }

    /// Every line of a file with `len` lines.
    #[must_use]
    pub const fn whole(len: usize) -> Self {
        Self { first: 0, end: len }
    }

    #[must_use]
    pub const fn first(&self) -> usize {
        self.first
    }

    /// Last line index of the block, `None` when it is empty.
    #[must_use]
    pub const fn last(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.end - 1)
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first >= self.end
    }

    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.first && index < self.end
    }

    #[must_use]
    pub const fn indices(&self) -> Range<usize> {
        self.first..self.end
    }
}
