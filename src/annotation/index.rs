//! Ordered, immutable annotation index with offset lookup.

use super::range::AnnotationRange;
use crate::error::{AnnotationError, AnnotationResult};
use serde::Serialize;
use std::fmt;

/// Non-fatal findings recorded while walking a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// The walk ended somewhere other than the codec's serialized length
    LengthMismatch { expected: usize, actual: usize },
    /// Bytes after the locktime that no range covers
    TrailingBytes { covered: usize, buffer_len: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::LengthMismatch { expected, actual } => write!(
                f,
                "expected to read {} bytes, but read {} bytes instead",
                expected, actual
            ),
            Diagnostic::TrailingBytes {
                covered,
                buffer_len,
            } => write!(
                f,
                "{} trailing bytes after offset {} are not annotated",
                buffer_len.saturating_sub(*covered),
                covered
            ),
        }
    }
}

/// The annotated ranges of one transaction, sorted by offset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationIndex {
    ranges: Vec<AnnotationRange>,
    diagnostics: Vec<Diagnostic>,
}

impl AnnotationIndex {
    /// Ranges must already be sorted and non-overlapping.
    pub(crate) fn new(ranges: Vec<AnnotationRange>, diagnostics: Vec<Diagnostic>) -> Self {
        debug_assert!(ranges.windows(2).all(|w| w[0].end <= w[1].start));
        Self {
            ranges,
            diagnostics,
        }
    }

    /// Find the range covering `offset`.
    ///
    /// Offsets are signed so that positions coming straight from a UI
    /// (which may be negative or past the end) can be passed through.
    pub fn range_for_byte(&self, offset: i64) -> AnnotationResult<&AnnotationRange> {
        let position =
            usize::try_from(offset).map_err(|_| AnnotationError::OffsetNotFound { offset })?;

        let candidate = self.ranges.partition_point(|range| range.end <= position);
        self.ranges
            .get(candidate)
            .filter(|range| range.contains(position))
            .ok_or(AnnotationError::OffsetNotFound { offset })
    }

    pub fn ranges(&self) -> &[AnnotationRange] {
        &self.ranges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnnotationRange> {
        self.ranges.iter()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// End offset of the last range
    pub fn covered_len(&self) -> usize {
        self.ranges.last().map(|range| range.end).unwrap_or(0)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// True when the walk finished without diagnostics
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl<'a> IntoIterator for &'a AnnotationIndex {
    type Item = &'a AnnotationRange;
    type IntoIter = std::slice::Iter<'a, AnnotationRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}
