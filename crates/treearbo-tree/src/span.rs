//! Source location tracking for tree nodes.

use std::fmt;
use std::sync::Arc;

use crate::error::SpanError;

/// A span represents a run of characters on one row of a source text.
///
/// Rows and columns are 1-based and counted in characters. Spans are
/// immutable; every derived span shares the `uri` and `source` of its origin.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    uri: Arc<str>,
    source: Arc<str>,
    row: usize,
    col: usize,
    length: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(
        uri: impl Into<Arc<str>>,
        source: impl Into<Arc<str>>,
        row: usize,
        col: usize,
        length: usize,
    ) -> Self {
        debug_assert!(row >= 1 && col >= 1, "rows and columns are 1-based");
        Self {
            uri: uri.into(),
            source: source.into(),
            row,
            col,
            length,
        }
    }

    /// Create an empty span at the start of a source.
    pub fn begin(uri: impl Into<Arc<str>>, source: impl Into<Arc<str>>) -> Self {
        Self::new(uri, source, 1, 1, 0)
    }

    /// Create an empty span just past the end of a source.
    pub fn end(uri: impl Into<Arc<str>>, source: impl Into<Arc<str>>) -> Self {
        let source = source.into();
        let col = source.chars().count() + 1;
        Self::new(uri, source, 1, col, 0)
    }

    /// Create a span covering a whole source.
    pub fn entire(uri: impl Into<Arc<str>>, source: impl Into<Arc<str>>) -> Self {
        let source = source.into();
        let length = source.chars().count();
        Self::new(uri, source, 1, 1, length)
    }

    /// Placeholder span for synthesized nodes.
    pub fn unknown() -> Self {
        Self::begin("?", "")
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Create a span at another position of the same source.
    pub fn span(&self, row: usize, col: usize, length: usize) -> Self {
        Self {
            uri: Arc::clone(&self.uri),
            source: Arc::clone(&self.source),
            row,
            col,
            length,
        }
    }

    /// Create the span that directly follows this one on the same row.
    pub fn after(&self, length: usize) -> Self {
        self.span(self.row, self.col + self.length, length)
    }

    /// Cut a sub-span out of this one.
    ///
    /// Negative bounds count back from `length`, so `slice(-3, -1)` on a span
    /// of length 5 covers characters 2..4.
    pub fn slice(&self, begin: isize, end: isize) -> Result<Self, SpanError> {
        let length = self.length as isize;
        let begin = if begin < 0 { begin + length } else { begin };
        let end = if end < 0 { end + length } else { end };

        if begin < 0 || begin > length {
            return Err(SpanError::BeginOutOfRange {
                begin,
                span: self.clone(),
            });
        }
        if end < 0 || end > length {
            return Err(SpanError::EndOutOfRange {
                end,
                span: self.clone(),
            });
        }
        if end < begin {
            return Err(SpanError::Inverted {
                end,
                span: self.clone(),
            });
        }

        Ok(self.span(
            self.row,
            self.col + begin as usize,
            (end - begin) as usize,
        ))
    }

    /// Byte offset of the span start within `source`.
    ///
    /// Positions past the end of a row or of the source clamp to the nearest
    /// valid offset.
    pub fn offset(&self) -> usize {
        let mut offset = 0;
        for (index, line) in self.source.split('\n').enumerate() {
            if index + 1 == self.row {
                let within = line
                    .char_indices()
                    .nth(self.col - 1)
                    .map_or(line.len(), |(at, _)| at);
                return offset + within;
            }
            offset += line.len() + 1;
        }
        self.source.len()
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}:{}/{}", self.uri, self.row, self.col, self.length)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Span {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Span", 4)?;
        state.serialize_field("uri", &*self.uri)?;
        state.serialize_field("row", &self.row)?;
        state.serialize_field("col", &self.col)?;
        state.serialize_field("length", &self.length)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Span {
        Span::new("test.tree", "", 1, 3, 5)
    }

    #[test]
    fn test_span_keeps_uri() {
        let child = Span::new("test.tree", "", 1, 3, 4).span(4, 5, 8);

        assert_eq!(child.uri(), "test.tree");
        assert_eq!((child.row(), child.col(), child.length()), (4, 5, 8));
    }

    #[test]
    fn test_after() {
        let child = Span::new("test.tree", "", 1, 3, 4).after(11);

        assert_eq!((child.row(), child.col(), child.length()), (1, 7, 11));
    }

    #[test]
    fn test_slice_regular() {
        let span = sample();

        let child = span.slice(1, 4).unwrap();
        assert_eq!((child.row(), child.col(), child.length()), (1, 4, 3));

        let empty = span.slice(2, 2).unwrap();
        assert_eq!((empty.col(), empty.length()), (5, 0));
    }

    #[test]
    fn test_slice_negative() {
        let child = sample().slice(-3, -1).unwrap();

        assert_eq!((child.row(), child.col(), child.length()), (1, 5, 2));
    }

    #[test]
    fn test_slice_out_of_range() {
        let span = sample();

        assert!(matches!(
            span.slice(-1, 3),
            Err(SpanError::Inverted { end: 3, .. })
        ));
        assert!(matches!(
            span.slice(1, 6),
            Err(SpanError::EndOutOfRange { end: 6, .. })
        ));
        assert!(matches!(
            span.slice(-6, 2),
            Err(SpanError::BeginOutOfRange { begin: -1, .. })
        ));
    }

    #[test]
    fn test_constructors() {
        let source = "a b\n";

        assert_eq!(Span::begin("x", source).to_string(), "x#1:1/0");
        assert_eq!(Span::end("x", source).to_string(), "x#1:5/0");
        assert_eq!(Span::entire("x", source).to_string(), "x#1:1/4");
        assert_eq!(Span::unknown().to_string(), "?#1:1/0");
    }

    #[test]
    fn test_offset() {
        let whole = Span::entire("x", "a b\n\tcé d\n");

        assert_eq!(whole.span(1, 3, 1).offset(), 2);
        assert_eq!(whole.span(2, 1, 1).offset(), 4);
        assert_eq!(whole.span(2, 4, 1).offset(), 8);
        assert_eq!(whole.span(9, 1, 1).offset(), 11);
    }
}
