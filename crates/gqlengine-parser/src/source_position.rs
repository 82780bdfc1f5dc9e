use crate::ast::Pos;

/// A location within lexed source text.
///
/// Positions are computed by the lexer while it scans and never mutated
/// afterwards.
///
/// # Indexing Convention
///
/// **All values are 0-based:**
/// - `line`: 0 = first line of the document
/// - `column`: character (not byte) count from the start of the line
/// - `byte_offset`: byte offset from the start of the document
///
/// AST nodes and outbound errors use the 1-based [`Pos`] form instead; see
/// [`SourcePosition::to_ast_pos()`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SourcePosition {
    line: usize,
    column: usize,
    byte_offset: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize, byte_offset: usize) -> Self {
        Self {
            line,
            column,
            byte_offset,
        }
    }

    /// Returns the 0-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the 0-based character column within the current line.
    ///
    /// Multi-byte characters (e.g. `é` or an emoji) advance this by 1.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Converts to the 1-based line/column pair stored on AST nodes.
    pub fn to_ast_pos(&self) -> Pos {
        Pos {
            line: self.line + 1,
            column: self.column + 1,
        }
    }
}
