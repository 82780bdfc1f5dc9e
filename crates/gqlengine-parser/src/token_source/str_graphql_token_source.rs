//! A [`GraphQLTokenSource`](crate::token_source::GraphQLTokenSource) that
//! lexes a `&str`.
//!
//! Token values borrow from the source text (`Cow::Borrowed`), so lexing
//! does not allocate for names, numbers or strings.
//!
//! # Usage
//!
//! ```rust
//! use gqlengine_parser::token::GraphQLTokenKind;
//! use gqlengine_parser::token_source::StrGraphQLTokenSource;
//!
//! let kinds: Vec<_> = StrGraphQLTokenSource::new("{ name }")
//!     .map(|token| token.kind)
//!     .collect();
//! assert_eq!(kinds, vec![
//!     GraphQLTokenKind::CurlyBraceOpen,
//!     GraphQLTokenKind::name_borrowed("name"),
//!     GraphQLTokenKind::CurlyBraceClose,
//!     GraphQLTokenKind::Eof,
//! ]);
//! ```

use crate::GraphQLErrorNote;
use crate::GraphQLSourceSpan;
use crate::SourcePosition;
use crate::smallvec;
use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;
use std::borrow::Cow;
use std::path::Path;

/// Lexer over a `&str`.
///
/// The iterator yields tokens lazily and ends with exactly one
/// [`GraphQLTokenKind::Eof`] token. Invalid input yields
/// [`GraphQLTokenKind::Error`] tokens rather than stopping, so several lexer
/// errors can be reported from one pass. Cloning a token source restarts
/// lexing from the clone's current position.
#[derive(Clone, Debug)]
pub struct StrGraphQLTokenSource<'src> {
    source: &'src str,

    /// The remaining text to lex is `&source[curr_byte_offset..]`.
    curr_byte_offset: usize,

    curr_line: usize,

    /// Character (not byte) column within the current line.
    curr_column: usize,

    /// Set after `\r` so that a following `\n` is not counted as a second
    /// line break.
    last_char_was_cr: bool,

    finished: bool,

    file_path: Option<&'src Path>,
}

impl<'src> StrGraphQLTokenSource<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            curr_byte_offset: 0,
            curr_line: 0,
            curr_column: 0,
            last_char_was_cr: false,
            finished: false,
            file_path: None,
        }
    }

    /// Creates a token source whose spans carry `path`.
    pub fn with_file_path(source: &'src str, path: &'src Path) -> Self {
        Self {
            file_path: Some(path),
            ..Self::new(source)
        }
    }

    // =========================================================================
    // Position and scanning helpers
    // =========================================================================

    fn remaining(&self) -> &'src str {
        &self.source[self.curr_byte_offset..]
    }

    fn curr_position(&self) -> SourcePosition {
        SourcePosition::new(self.curr_line, self.curr_column, self.curr_byte_offset)
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn peek_char_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Consumes one character, tracking line breaks (`\n`, `\r`, `\r\n`).
    fn consume(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        match ch {
            '\n' if self.last_char_was_cr => {
                self.last_char_was_cr = false;
            },
            '\n' => {
                self.curr_line += 1;
                self.curr_column = 0;
            },
            '\r' => {
                self.curr_line += 1;
                self.curr_column = 0;
                self.last_char_was_cr = true;
            },
            _ => {
                self.curr_column += 1;
                self.last_char_was_cr = false;
            },
        }
        self.curr_byte_offset += ch.len_utf8();
        Some(ch)
    }

    fn consume_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek_char() {
            if !pred(ch) {
                break;
            }
            self.consume();
        }
    }

    fn make_span(&self, start: SourcePosition) -> GraphQLSourceSpan {
        let end = self.curr_position();
        match self.file_path {
            Some(path) => GraphQLSourceSpan::with_file(start, end, path.to_path_buf()),
            None => GraphQLSourceSpan::new(start, end),
        }
    }

    fn token_from(&self, start: SourcePosition, kind: GraphQLTokenKind<'src>) -> GraphQLToken<'src> {
        GraphQLToken::new(kind, self.make_span(start))
    }

    fn punctuator(&mut self, start: SourcePosition, kind: GraphQLTokenKind<'src>) -> GraphQLToken<'src> {
        self.consume();
        self.token_from(start, kind)
    }

    // =========================================================================
    // Lexer main loop
    // =========================================================================

    fn next_token(&mut self) -> GraphQLToken<'src> {
        loop {
            self.skip_ignored();
            let start = self.curr_position();

            return match self.peek_char() {
                None => self.token_from(start, GraphQLTokenKind::Eof),

                Some('#') => {
                    self.skip_comment();
                    continue;
                },

                Some('!') => self.punctuator(start, GraphQLTokenKind::Bang),
                Some('$') => self.punctuator(start, GraphQLTokenKind::Dollar),
                Some('&') => self.punctuator(start, GraphQLTokenKind::Ampersand),
                Some('(') => self.punctuator(start, GraphQLTokenKind::ParenOpen),
                Some(')') => self.punctuator(start, GraphQLTokenKind::ParenClose),
                Some(':') => self.punctuator(start, GraphQLTokenKind::Colon),
                Some('=') => self.punctuator(start, GraphQLTokenKind::Equals),
                Some('@') => self.punctuator(start, GraphQLTokenKind::At),
                Some('[') => self.punctuator(start, GraphQLTokenKind::SquareBracketOpen),
                Some(']') => self.punctuator(start, GraphQLTokenKind::SquareBracketClose),
                Some('{') => self.punctuator(start, GraphQLTokenKind::CurlyBraceOpen),
                Some('}') => self.punctuator(start, GraphQLTokenKind::CurlyBraceClose),
                Some('|') => self.punctuator(start, GraphQLTokenKind::Pipe),

                Some('.') => self.lex_ellipsis(start),
                Some('"') => self.lex_string(start),
                Some(c) if is_name_start(c) => self.lex_name(start),
                Some(c) if c == '-' || c.is_ascii_digit() => self.lex_number(start),

                Some(ch) => {
                    self.consume();
                    self.token_from(start, GraphQLTokenKind::error(
                        format!("Unexpected character {}", describe_char(ch)),
                        smallvec![],
                    ))
                },
            };
        }
    }

    /// Skips whitespace, line terminators, commas and the BOM.
    fn skip_ignored(&mut self) {
        self.consume_while(|ch| matches!(ch, ' ' | '\t' | '\n' | '\r' | ',' | '\u{FEFF}'));
    }

    /// Skips a `#` comment up to (not including) the line terminator.
    fn skip_comment(&mut self) {
        let rest = self.remaining();
        let len = memchr::memchr2(b'\n', b'\r', rest.as_bytes()).unwrap_or(rest.len());
        self.curr_column += rest[..len].chars().count();
        self.curr_byte_offset += len;
        self.last_char_was_cr = false;
    }

    // =========================================================================
    // Ellipsis
    // =========================================================================

    fn lex_ellipsis(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        if self.remaining().starts_with("...") {
            self.consume();
            self.consume();
            self.consume();
            return self.token_from(start, GraphQLTokenKind::Ellipsis);
        }

        let dots = if self.remaining().starts_with("..") { 2 } else { 1 };
        for _ in 0..dots {
            self.consume();
        }
        let notes = if dots == 2 {
            smallvec![GraphQLErrorNote::help(
                "Add one more `.` to form the spread operator `...`"
            )]
        } else {
            smallvec![]
        };
        self.token_from(start, GraphQLTokenKind::error(
            format!("Unexpected `{}`", ".".repeat(dots)),
            notes,
        ))
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// Names match `/[_A-Za-z][_0-9A-Za-z]*/`; `true`, `false` and `null` get
    /// their own token kinds.
    fn lex_name(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        let name_start = self.curr_byte_offset;
        self.consume();
        self.consume_while(is_name_continue);
        let name = &self.source[name_start..self.curr_byte_offset];

        let kind = match name {
            "true" => GraphQLTokenKind::True,
            "false" => GraphQLTokenKind::False,
            "null" => GraphQLTokenKind::Null,
            _ => GraphQLTokenKind::name_borrowed(name),
        };
        self.token_from(start, kind)
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    /// `-? (0 | [1-9][0-9]*) (\.[0-9]+)? ([eE][+-]?[0-9]+)?`
    ///
    /// A number immediately followed by a name character or `.` is an error
    /// (e.g. `123abc`, `1.`).
    fn lex_number(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        let num_start = self.curr_byte_offset;
        let mut is_float = false;

        if self.peek_char() == Some('-') {
            self.consume();
        }

        match self.peek_char() {
            Some('0') => {
                self.consume();
                if self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                    return self.lex_number_error(
                        start,
                        num_start,
                        "Invalid number: leading zeros are not allowed",
                    );
                }
            },
            Some(c) if c.is_ascii_digit() => {
                self.consume_while(|c| c.is_ascii_digit());
            },
            _ => {
                return self.token_from(start, GraphQLTokenKind::error("Unexpected `-`", smallvec![]));
            },
        }

        if self.peek_char() == Some('.') {
            if !self.peek_char_nth(1).is_some_and(|c| c.is_ascii_digit()) {
                self.consume();
                return self.lex_number_error(
                    start,
                    num_start,
                    "Invalid number: expected digit after `.`",
                );
            }
            is_float = true;
            self.consume();
            self.consume_while(|c| c.is_ascii_digit());
        }

        if matches!(self.peek_char(), Some('e' | 'E')) {
            is_float = true;
            self.consume();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.consume();
            }
            if !self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                return self.lex_number_error(
                    start,
                    num_start,
                    "Invalid number: exponent must have at least one digit",
                );
            }
            self.consume_while(|c| c.is_ascii_digit());
        }

        if self.peek_char().is_some_and(|c| c == '.' || is_name_start(c)) {
            return self.lex_number_error(
                start,
                num_start,
                "Invalid number: unexpected character after numeric literal",
            );
        }

        let text = Cow::Borrowed(&self.source[num_start..self.curr_byte_offset]);
        let kind = if is_float {
            GraphQLTokenKind::FloatValue(text)
        } else {
            GraphQLTokenKind::IntValue(text)
        };
        self.token_from(start, kind)
    }

    fn lex_number_error(
        &mut self,
        start: SourcePosition,
        num_start: usize,
        message: &str,
    ) -> GraphQLToken<'src> {
        // Swallow the rest of the malformed literal so lexing resumes after it.
        self.consume_while(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-' | '_'));
        let invalid_text = &self.source[num_start..self.curr_byte_offset];
        self.token_from(start, GraphQLTokenKind::error(
            format!("{message}: `{invalid_text}`"),
            smallvec![],
        ))
    }

    // =========================================================================
    // Strings
    // =========================================================================

    fn lex_string(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        let str_start = self.curr_byte_offset;
        if self.remaining().starts_with("\"\"\"") {
            return self.lex_block_string(start, str_start);
        }

        self.consume();
        loop {
            match self.peek_char() {
                None | Some('\n') | Some('\r') => {
                    let span = self.make_span(start);
                    return GraphQLToken::new(
                        GraphQLTokenKind::error(
                            "Unterminated string literal",
                            smallvec![
                                GraphQLErrorNote::general_with_span(
                                    "String started here",
                                    GraphQLSourceSpan::point(start),
                                ),
                                GraphQLErrorNote::help(
                                    "Add a closing `\"`, or use a block string (`\"\"\"`) \
                                     for multi-line text",
                                ),
                            ],
                        ),
                        span,
                    );
                },
                Some('"') => {
                    self.consume();
                    break;
                },
                Some('\\') => {
                    self.consume();
                    if !matches!(self.peek_char(), None | Some('\n') | Some('\r')) {
                        self.consume();
                    }
                },
                Some(_) => {
                    self.consume();
                },
            }
        }

        let text = &self.source[str_start..self.curr_byte_offset];
        self.token_from(start, GraphQLTokenKind::StringValue(Cow::Borrowed(text)))
    }

    fn lex_block_string(&mut self, start: SourcePosition, str_start: usize) -> GraphQLToken<'src> {
        for _ in 0..3 {
            self.consume();
        }

        loop {
            let rest = self.remaining();
            if rest.is_empty() {
                let span = self.make_span(start);
                return GraphQLToken::new(
                    GraphQLTokenKind::error(
                        "Unterminated block string",
                        smallvec![
                            GraphQLErrorNote::general_with_span(
                                "Block string started here",
                                GraphQLSourceSpan::point(start),
                            ),
                            GraphQLErrorNote::help("Add closing `\"\"\"`"),
                        ],
                    ),
                    span,
                );
            }
            if rest.starts_with("\\\"\"\"") {
                for _ in 0..4 {
                    self.consume();
                }
            } else if rest.starts_with("\"\"\"") {
                for _ in 0..3 {
                    self.consume();
                }
                break;
            } else {
                self.consume();
            }
        }

        let text = &self.source[str_start..self.curr_byte_offset];
        self.token_from(start, GraphQLTokenKind::StringValue(Cow::Borrowed(text)))
    }
}

impl<'src> Iterator for StrGraphQLTokenSource<'src> {
    type Item = GraphQLToken<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if matches!(token.kind, GraphQLTokenKind::Eof) {
            self.finished = true;
        }
        Some(token)
    }
}

fn is_name_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

fn is_name_continue(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}

/// Describes a character for error messages, spelling out the code point of
/// invisible ones.
fn describe_char(ch: char) -> String {
    if ch.is_control() || (ch.is_whitespace() && ch != ' ') {
        format!("`{}` (U+{:04X})", ch.escape_debug(), ch as u32)
    } else {
        format!("`{ch}`")
    }
}
