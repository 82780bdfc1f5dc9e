use crate::GraphQLErrorNote;
use crate::GraphQLErrorNoteKind;
use crate::GraphQLErrorNotes;
use crate::GraphQLParseErrorKind;
use crate::GraphQLSourceSpan;
use crate::ast::Pos;

/// A parse error with its location and contextual notes.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", self.format_oneline())]
pub struct GraphQLParseError {
    /// Human-readable primary message, e.g. "expected `:`, found `1`".
    message: String,

    /// Where the error was detected. For "unexpected token" errors this is
    /// the token's span; for unclosed delimiters it is where the closing
    /// delimiter was expected.
    span: GraphQLSourceSpan,

    kind: GraphQLParseErrorKind,

    /// Suggestions and related locations (e.g. "opening `{` here").
    notes: GraphQLErrorNotes,
}

impl GraphQLParseError {
    pub fn new(
        message: impl Into<String>,
        span: GraphQLSourceSpan,
        kind: GraphQLParseErrorKind,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            notes: GraphQLErrorNotes::new(),
        }
    }

    pub fn with_notes(
        message: impl Into<String>,
        span: GraphQLSourceSpan,
        kind: GraphQLParseErrorKind,
        notes: GraphQLErrorNotes,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            notes,
        }
    }

    /// Converts a lexer error token into a parse error, keeping the lexer's
    /// message and notes.
    pub fn from_lexer_error(
        message: impl Into<String>,
        span: GraphQLSourceSpan,
        lexer_notes: GraphQLErrorNotes,
    ) -> Self {
        Self::with_notes(message, span, GraphQLParseErrorKind::LexerError, lexer_notes)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> &GraphQLSourceSpan {
        &self.span
    }

    pub fn kind(&self) -> &GraphQLParseErrorKind {
        &self.kind
    }

    pub fn notes(&self) -> &GraphQLErrorNotes {
        &self.notes
    }

    /// The 1-based location of the error's start.
    pub fn pos(&self) -> Pos {
        self.span.start_inclusive.to_ast_pos()
    }

    pub fn add_note(&mut self, message: impl Into<String>) {
        self.notes.push(GraphQLErrorNote::general(message));
    }

    pub fn add_note_with_span(&mut self, message: impl Into<String>, span: GraphQLSourceSpan) {
        self.notes.push(GraphQLErrorNote::general_with_span(message, span));
    }

    pub fn add_help(&mut self, message: impl Into<String>) {
        self.notes.push(GraphQLErrorNote::help(message));
    }

    pub fn add_spec(&mut self, url: impl Into<String>) {
        self.notes.push(GraphQLErrorNote::spec(url));
    }

    fn file_name(&self) -> String {
        self.span
            .file_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<input>".to_string())
    }

    /// Formats this error as a multi-line diagnostic for CLI output:
    ///
    /// ```text
    /// error: expected `:`, found `1`
    ///   --> query.graphql:1:17
    ///    |
    ///  1 | query { user(id 1) { name } }
    ///    |                 ^
    /// ```
    ///
    /// Snippets are omitted when `source` is `None`.
    pub fn format_detailed(&self, source: Option<&str>) -> String {
        let mut output = String::new();

        output.push_str("error: ");
        output.push_str(&self.message);
        output.push('\n');

        let line = self.span.start_inclusive.line() + 1;
        let column = self.span.start_inclusive.column() + 1;
        output.push_str(&format!("  --> {}:{line}:{column}\n", self.file_name()));

        if let Some(src) = source
            && let Some(snippet) = self.format_source_snippet(src)
        {
            output.push_str(&snippet);
        }

        for note in &self.notes {
            let prefix = match note.kind {
                GraphQLErrorNoteKind::General => "note",
                GraphQLErrorNoteKind::Help => "help",
                GraphQLErrorNoteKind::Spec => "spec",
            };
            output.push_str(&format!("   = {prefix}: {}\n", note.message));

            if let (Some(note_span), Some(src)) = (&note.span, source)
                && let Some(snippet) = Self::format_note_snippet(src, note_span)
            {
                output.push_str(&snippet);
            }
        }

        output
    }

    /// Formats this error on one line: `file:line:col: error: message`.
    pub fn format_oneline(&self) -> String {
        let line = self.span.start_inclusive.line() + 1;
        let column = self.span.start_inclusive.column() + 1;
        format!("{}:{line}:{column}: error: {}", self.file_name(), self.message)
    }

    fn format_source_snippet(&self, source: &str) -> Option<String> {
        let line_num = self.span.start_inclusive.line();
        let line_content = source.lines().nth(line_num)?;
        let display_line_num = line_num + 1;
        let width = display_line_num.to_string().len().max(2);

        let col_start = self.span.start_inclusive.column();
        let col_end = if self.span.end_exclusive.line() == line_num {
            self.span.end_exclusive.column()
        } else {
            line_content.chars().count()
        };
        let underline_len = col_end.saturating_sub(col_start).max(1);

        let mut output = String::new();
        output.push_str(&format!("{:>width$} |\n", ""));
        output.push_str(&format!("{display_line_num:>width$} | {line_content}\n"));
        output.push_str(&format!(
            "{:>width$} | {:>col_start$}{}\n",
            "",
            "",
            "^".repeat(underline_len),
        ));
        Some(output)
    }

    fn format_note_snippet(source: &str, span: &GraphQLSourceSpan) -> Option<String> {
        let line_num = span.start_inclusive.line();
        let line_content = source.lines().nth(line_num)?;
        let display_line_num = line_num + 1;
        let width = display_line_num.to_string().len().max(2);
        let col_start = span.start_inclusive.column();

        let mut output = String::new();
        output.push_str(&format!("     {display_line_num:>width$} | {line_content}\n"));
        output.push_str(&format!("     {:>width$} | {:>col_start$}-\n", "", ""));
        Some(output)
    }
}
