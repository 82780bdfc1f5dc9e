use crate::GraphQLStringParsingError;
use std::iter::Peekable;
use std::str::Chars;

/// Cooks the raw text of a string literal (quotes included) into its value.
pub(crate) fn cook_string_value(raw: &str) -> Result<String, GraphQLStringParsingError> {
    if raw.starts_with("\"\"\"") {
        cook_block_string(raw)
    } else {
        cook_quoted_string(raw)
    }
}

fn cook_quoted_string(raw: &str) -> Result<String, GraphQLStringParsingError> {
    if raw.len() < 2 || !raw.starts_with('"') || !raw.ends_with('"') {
        return Err(GraphQLStringParsingError::UnterminatedString);
    }
    let content = &raw[1..raw.len() - 1];
    let mut cooked = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            cooked.push(ch);
            continue;
        }
        match chars.next() {
            Some('"') => cooked.push('"'),
            Some('\\') => cooked.push('\\'),
            Some('/') => cooked.push('/'),
            Some('b') => cooked.push('\u{0008}'),
            Some('f') => cooked.push('\u{000C}'),
            Some('n') => cooked.push('\n'),
            Some('r') => cooked.push('\r'),
            Some('t') => cooked.push('\t'),
            Some('u') => cooked.push(cook_unicode_escape(&mut chars)?),
            Some(other) => {
                return Err(GraphQLStringParsingError::InvalidEscapeSequence(format!(
                    "\\{other}"
                )));
            }
            None => {
                return Err(GraphQLStringParsingError::InvalidEscapeSequence(
                    "\\".to_string(),
                ));
            }
        }
    }

    Ok(cooked)
}

/// Reads the code point following `\u`: either `{X...}` or exactly four hex
/// digits. A leading surrogate in the fixed form must be followed by a
/// `\uXXXX` trailing surrogate.
fn cook_unicode_escape(chars: &mut Peekable<Chars<'_>>) -> Result<char, GraphQLStringParsingError> {
    if chars.peek() == Some(&'{') {
        chars.next();
        let mut hex = String::new();
        loop {
            match chars.next() {
                Some('}') => break,
                Some(c) if c.is_ascii_hexdigit() && hex.len() < 8 => hex.push(c),
                Some(c) => {
                    return Err(GraphQLStringParsingError::InvalidUnicodeEscape(format!(
                        "\\u{{{hex}{c}"
                    )));
                }
                None => {
                    return Err(GraphQLStringParsingError::InvalidUnicodeEscape(format!(
                        "\\u{{{hex}"
                    )));
                }
            }
        }
        return u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| {
                GraphQLStringParsingError::InvalidUnicodeEscape(format!("\\u{{{hex}}}"))
            });
    }

    let lead = read_four_hex_digits(chars)?;
    if !(0xD800..=0xDBFF).contains(&lead) {
        return char::from_u32(lead).ok_or_else(|| {
            GraphQLStringParsingError::InvalidUnicodeEscape(format!("\\u{lead:04X}"))
        });
    }

    // Surrogate pair, e.g. `\uD83D\uDE00`
    if chars.next() != Some('\\') || chars.next() != Some('u') {
        return Err(GraphQLStringParsingError::InvalidUnicodeEscape(format!(
            "\\u{lead:04X}"
        )));
    }
    let trail = read_four_hex_digits(chars)?;
    if !(0xDC00..=0xDFFF).contains(&trail) {
        return Err(GraphQLStringParsingError::InvalidUnicodeEscape(format!(
            "\\u{lead:04X}\\u{trail:04X}"
        )));
    }
    let code_point = 0x10000 + ((lead - 0xD800) << 10) + (trail - 0xDC00);
    char::from_u32(code_point).ok_or_else(|| {
        GraphQLStringParsingError::InvalidUnicodeEscape(format!(
            "\\u{lead:04X}\\u{trail:04X}"
        ))
    })
}

fn read_four_hex_digits(chars: &mut Peekable<Chars<'_>>) -> Result<u32, GraphQLStringParsingError> {
    let mut hex = String::with_capacity(4);
    for _ in 0..4 {
        match chars.next() {
            Some(c) if c.is_ascii_hexdigit() => hex.push(c),
            Some(c) => {
                return Err(GraphQLStringParsingError::InvalidUnicodeEscape(format!(
                    "\\u{hex}{c}"
                )));
            }
            None => {
                return Err(GraphQLStringParsingError::InvalidUnicodeEscape(format!(
                    "\\u{hex}"
                )));
            }
        }
    }
    u32::from_str_radix(&hex, 16)
        .map_err(|_| GraphQLStringParsingError::InvalidUnicodeEscape(format!("\\u{hex}")))
}

/// Block strings keep their content verbatim apart from `\"""`, with the
/// common indentation of all lines after the first removed and leading and
/// trailing blank lines dropped.
fn cook_block_string(raw: &str) -> Result<String, GraphQLStringParsingError> {
    if raw.len() < 6 || !raw.ends_with("\"\"\"") {
        return Err(GraphQLStringParsingError::UnterminatedString);
    }
    let content = raw[3..raw.len() - 3].replace("\\\"\"\"", "\"\"\"");
    let lines: Vec<&str> = content
        .split("\r\n")
        .flat_map(|chunk| chunk.split(['\n', '\r']))
        .collect();

    let common_indent = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let indent = leading_whitespace_len(line);
            (indent < line.len()).then_some(indent)
        })
        .min()
        .unwrap_or(0);

    let mut dedented: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            if idx == 0 || line.len() < common_indent {
                *line
            } else {
                &line[common_indent..]
            }
        })
        .collect();

    while dedented.first().is_some_and(|line| is_blank(line)) {
        dedented.remove(0);
    }
    while dedented.last().is_some_and(|line| is_blank(line)) {
        dedented.pop();
    }

    Ok(dedented.join("\n"))
}

fn leading_whitespace_len(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

fn is_blank(line: &str) -> bool {
    leading_whitespace_len(line) == line.len()
}
