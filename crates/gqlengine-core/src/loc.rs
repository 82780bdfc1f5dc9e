//! Source locations of schema definitions.

use gqlengine_parser::ast;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;

/// A 1-based line/column inside a schema source, plus the file (or
/// `str://N` pseudo-path) it came from.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FilePosition {
    pub col: usize,
    pub file: PathBuf,
    pub line: usize,
}
impl FilePosition {
    pub(crate) fn from_pos(file: &Path, pos: ast::Pos) -> Self {
        Self {
            col: pos.column,
            file: file.to_path_buf(),
            line: pos.line,
        }
    }
}
impl fmt::Display for FilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.col)
    }
}

/// Where a schema element was defined: in loaded SDL, or implicitly by the
/// engine (built-in scalars and directives).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum SchemaDefLocation {
    GraphQLBuiltIn,
    Schema(FilePosition),
}
impl From<FilePosition> for SchemaDefLocation {
    fn from(value: FilePosition) -> Self {
        Self::Schema(value)
    }
}
impl fmt::Display for SchemaDefLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GraphQLBuiltIn => f.write_str("<builtin>"),
            Self::Schema(pos) => pos.fmt(f),
        }
    }
}
