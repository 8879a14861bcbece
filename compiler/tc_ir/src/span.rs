//! Source location spans.
//!
//! Byte offsets into the source text, packed into 8 bytes.

use std::fmt;

/// Error when creating a span from a range that exceeds `u32::MAX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanError {
    /// Span start position exceeds `u32::MAX`.
    StartTooLarge(usize),
    /// Span end position exceeds `u32::MAX`.
    EndTooLarge(usize),
}

impl fmt::Display for SpanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanError::StartTooLarge(v) => {
                write!(f, "span start {v} does not fit in a 32-bit offset")
            }
            SpanError::EndTooLarge(v) => write!(f, "span end {v} does not fit in a 32-bit offset"),
        }
    }
}

impl std::error::Error for SpanError {}

/// Half-open byte range `start..end` into a source file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(C)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Span for synthesized nodes that have no source text.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Convert a lexer byte range, failing for sources larger than 4 GiB.
    #[inline]
    pub fn try_from_range(range: std::ops::Range<usize>) -> Result<Self, SpanError> {
        let start =
            u32::try_from(range.start).map_err(|_| SpanError::StartTooLarge(range.start))?;
        let end = u32::try_from(range.end).map_err(|_| SpanError::EndTooLarge(range.end))?;
        Ok(Span { start, end })
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if an offset is within this span.
    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Zero-length span at `offset`.
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span {
            start: offset,
            end: offset,
        }
    }

    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Span;
    crate::static_assert_size!(Span, 8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basic() {
        let span = Span::new(4, 9);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert!(span.contains(4));
        assert!(!span.contains(9));
    }

    #[test]
    fn test_span_merge_is_order_independent() {
        let a = Span::new(10, 20);
        let b = Span::new(2, 12);
        assert_eq!(a.merge(b), Span::new(2, 20));
        assert_eq!(b.merge(a), Span::new(2, 20));
    }

    #[test]
    fn test_point_span() {
        let p = Span::point(7);
        assert!(p.is_empty());
        assert_eq!(p.to_range(), 7..7);
    }

    #[test]
    fn test_try_from_range_overflow() {
        let big = u32::MAX as usize + 1;
        assert_eq!(
            Span::try_from_range(0..big),
            Err(SpanError::EndTooLarge(big))
        );
        assert_eq!(Span::try_from_range(3..5), Ok(Span::new(3, 5)));
    }

    #[test]
    fn test_span_debug_format() {
        assert_eq!(format!("{:?}", Span::new(1, 3)), "1..3");
    }
}
