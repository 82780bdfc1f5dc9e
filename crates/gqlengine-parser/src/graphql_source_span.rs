use crate::SourcePosition;
use std::path::PathBuf;

/// A half-open span of source text: `[start_inclusive, end_exclusive)`.
///
/// Optionally names the file the text was read from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GraphQLSourceSpan {
    pub start_inclusive: SourcePosition,
    pub end_exclusive: SourcePosition,
    pub file_path: Option<PathBuf>,
}

impl GraphQLSourceSpan {
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self {
            start_inclusive: start,
            end_exclusive: end,
            file_path: None,
        }
    }

    pub fn with_file(
        start: SourcePosition,
        end: SourcePosition,
        file_path: PathBuf,
    ) -> Self {
        Self {
            start_inclusive: start,
            end_exclusive: end,
            file_path: Some(file_path),
        }
    }

    /// A zero-width span at `pos`.
    pub fn point(pos: SourcePosition) -> Self {
        Self::new(pos, pos)
    }

    /// Returns the source text covered by this span, if `source` is the text
    /// it was lexed from.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(
            self.start_inclusive.byte_offset()..self.end_exclusive.byte_offset(),
        )
    }
}
