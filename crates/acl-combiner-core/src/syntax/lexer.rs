//! Trivia-preserving lexer for HuJSON
//!
//! Whitespace, newlines and comments are emitted as tokens instead of being
//! skipped, so concatenating the token texts reproduces the input exactly.
//! The parser relies on this to decide which value a comment belongs to.

use super::SyntaxKind;
use std::ops::Range;

/// Byte range in the source
pub type Span = Range<usize>;

/// A lexer error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerError {
    pub message: String,
    pub span: Span,
}

impl LexerError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// A token with its syntax kind and span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: SyntaxKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

/// Result returned by the lexer
pub type LexResult = (Vec<Token>, Vec<LexerError>);

/// Lex input preserving all trivia
///
/// The returned token list always ends with an `Eof` token. Malformed input
/// produces `Error` tokens plus an entry in the error list; lexing continues
/// so that callers can report the first problem with full context.
pub fn lex_with_trivia(input: &str) -> LexResult {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    let len = input.len();
    let mut i = 0usize;

    while i < len {
        let Some((current, size)) = next_char(input, i) else {
            break;
        };
        let start = i;

        match current {
            '\n' => {
                tokens.push(Token::new(SyntaxKind::Newline, "\n", span(start, i + size)));
                i += size;
            }
            '\r' => {
                // \r\n is a single newline
                let mut end = i + size;
                if let Some(('\n', nl_size)) = next_char(input, end) {
                    end += nl_size;
                }
                tokens.push(Token::new(
                    SyntaxKind::Newline,
                    &input[start..end],
                    span(start, end),
                ));
                i = end;
            }
            ' ' | '\t' => {
                let mut end = i + size;
                while let Some((' ' | '\t', step)) = next_char(input, end) {
                    end += step;
                }
                tokens.push(Token::new(
                    SyntaxKind::Whitespace,
                    &input[start..end],
                    span(start, end),
                ));
                i = end;
            }
            '/' => match next_char(input, i + size) {
                Some(('/', next_size)) => {
                    let mut end = i + size + next_size;
                    while let Some((c, step)) = next_char(input, end) {
                        // The newline is not part of the comment
                        if c == '\n' || c == '\r' {
                            break;
                        }
                        end += step;
                    }
                    tokens.push(Token::new(
                        SyntaxKind::CommentLine,
                        &input[start..end],
                        span(start, end),
                    ));
                    i = end;
                }
                Some(('*', next_size)) => {
                    let (end, terminated) = lex_block_comment(input, i + size + next_size);
                    if !terminated {
                        errors.push(LexerError::new(
                            "unterminated block comment",
                            span(start, end),
                        ));
                    }
                    tokens.push(Token::new(
                        SyntaxKind::CommentBlock,
                        &input[start..end],
                        span(start, end),
                    ));
                    i = end;
                }
                _ => {
                    errors.push(LexerError::new("unexpected character '/'", span(start, i + size)));
                    tokens.push(Token::new(SyntaxKind::Error, "/", span(start, i + size)));
                    i += size;
                }
            },
            '{' => {
                tokens.push(Token::new(SyntaxKind::LBrace, "{", span(start, i + size)));
                i += size;
            }
            '}' => {
                tokens.push(Token::new(SyntaxKind::RBrace, "}", span(start, i + size)));
                i += size;
            }
            '[' => {
                tokens.push(Token::new(SyntaxKind::LBracket, "[", span(start, i + size)));
                i += size;
            }
            ']' => {
                tokens.push(Token::new(SyntaxKind::RBracket, "]", span(start, i + size)));
                i += size;
            }
            ':' => {
                tokens.push(Token::new(SyntaxKind::Colon, ":", span(start, i + size)));
                i += size;
            }
            ',' => {
                tokens.push(Token::new(SyntaxKind::Comma, ",", span(start, i + size)));
                i += size;
            }
            '"' => {
                let (end, error) = lex_string(input, start);
                let kind = if let Some(err) = error {
                    errors.push(err);
                    SyntaxKind::Error
                } else {
                    SyntaxKind::String
                };
                tokens.push(Token::new(kind, &input[start..end], span(start, end)));
                i = end;
            }
            '-' | '0'..='9' => {
                let (end, error) = lex_number(input, start);
                let kind = if let Some(err) = error {
                    errors.push(err);
                    SyntaxKind::Error
                } else {
                    SyntaxKind::Number
                };
                tokens.push(Token::new(kind, &input[start..end], span(start, end)));
                i = end;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let end = read_word(input, start);
                let word = &input[start..end];
                let kind = match word {
                    "true" => SyntaxKind::True,
                    "false" => SyntaxKind::False,
                    "null" => SyntaxKind::Null,
                    _ => {
                        errors.push(LexerError::new(
                            format!("invalid literal '{word}'"),
                            span(start, end),
                        ));
                        SyntaxKind::Error
                    }
                };
                tokens.push(Token::new(kind, word, span(start, end)));
                i = end;
            }
            // Leading byte order mark
            c if c == '\u{feff}' && start == 0 => {
                tokens.push(Token::new(
                    SyntaxKind::Whitespace,
                    &input[start..i + size],
                    span(start, i + size),
                ));
                i += size;
            }
            c => {
                errors.push(LexerError::new(
                    format!("unexpected character {c:?}"),
                    span(start, i + size),
                ));
                tokens.push(Token::new(
                    SyntaxKind::Error,
                    &input[start..i + size],
                    span(start, i + size),
                ));
                i += size;
            }
        }
    }

    tokens.push(Token::new(SyntaxKind::Eof, "", span(len, len)));
    (tokens, errors)
}

/// Scan a block comment body starting after the opening `/*`
///
/// Returns the end offset and whether the closing `*/` was found.
fn lex_block_comment(input: &str, body_start: usize) -> (usize, bool) {
    match input[body_start..].find("*/") {
        Some(rel) => (body_start + rel + 2, true),
        None => (input.len(), false),
    }
}

/// Lex a JSON string literal "..."
///
/// Escape sequences are skipped here and validated when the parser decodes
/// the literal. A raw newline ends the string as unterminated.
fn lex_string(input: &str, start: usize) -> (usize, Option<LexerError>) {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = start + 1; // Skip opening quote

    while i < len {
        match bytes[i] {
            b'"' => return (i + 1, None),
            b'\\' => {
                i += 1;
                if i < len && bytes[i] != b'\n' && bytes[i] != b'\r' {
                    i += 1;
                }
            }
            b'\n' | b'\r' => {
                return (
                    i,
                    Some(LexerError::new("unterminated string", span(start, i))),
                );
            }
            _ => i += 1,
        }
    }

    (
        len,
        Some(LexerError::new("unterminated string", span(start, len))),
    )
}

/// Lex a JSON number: -?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?
fn lex_number(input: &str, start: usize) -> (usize, Option<LexerError>) {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = start;

    if bytes[i] == b'-' {
        i += 1;
    }

    let int_start = i;
    if i < len && bytes[i] == b'0' {
        i += 1;
    } else {
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    let mut valid = i > int_start;

    if valid && i < len && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        valid = i > frac_start;
    }

    if valid && i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < len && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        valid = i > exp_start;
    }

    // Swallow the rest of a malformed run such as `01`, `1.` or `12abc`
    if !valid || (i < len && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'.')) {
        while i < len && (bytes[i].is_ascii_alphanumeric() || matches!(bytes[i], b'.' | b'+' | b'-'))
        {
            i += 1;
        }
        let end = i.max(start + 1);
        return (
            end,
            Some(LexerError::new(
                format!("malformed number '{}'", &input[start..end]),
                span(start, end),
            )),
        );
    }

    (i, None)
}

/// Read a word of ASCII alphanumerics and underscores
fn read_word(input: &str, start: usize) -> usize {
    let mut end = start;
    for (offset, ch) in input[start..].char_indices() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            end = start + offset + ch.len_utf8();
        } else {
            break;
        }
    }
    end
}

/// Get next character and its UTF-8 size
fn next_char(input: &str, pos: usize) -> Option<(char, usize)> {
    input[pos..].chars().next().map(|c| (c, c.len_utf8()))
}

fn span(start: usize, end: usize) -> Span {
    start..end
}
