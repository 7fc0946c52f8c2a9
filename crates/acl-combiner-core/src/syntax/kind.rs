//! Token kinds for HuJSON source text

/// Kind of a lexed token
///
/// Trivia kinds (whitespace, newlines, comments) are kept in the token stream
/// so that the parser can attach comments to the values around them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    // Trivia
    Whitespace,
    Newline,
    CommentLine,
    CommentBlock,

    // Punctuation
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Comma,

    // Literals
    String,
    Number,
    True,
    False,
    Null,

    // Special tokens
    Error,
    Eof,
}

impl SyntaxKind {
    /// Whitespace, newline or comment
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::Whitespace
                | SyntaxKind::Newline
                | SyntaxKind::CommentLine
                | SyntaxKind::CommentBlock
        )
    }

    pub fn is_comment(self) -> bool {
        matches!(self, SyntaxKind::CommentLine | SyntaxKind::CommentBlock)
    }

    /// Human readable description used in parse errors
    pub fn describe(self) -> &'static str {
        match self {
            SyntaxKind::Whitespace => "whitespace",
            SyntaxKind::Newline => "newline",
            SyntaxKind::CommentLine | SyntaxKind::CommentBlock => "comment",
            SyntaxKind::LBrace => "'{'",
            SyntaxKind::RBrace => "'}'",
            SyntaxKind::LBracket => "'['",
            SyntaxKind::RBracket => "']'",
            SyntaxKind::Colon => "':'",
            SyntaxKind::Comma => "','",
            SyntaxKind::String => "string",
            SyntaxKind::Number => "number",
            SyntaxKind::True | SyntaxKind::False => "boolean",
            SyntaxKind::Null => "null",
            SyntaxKind::Error => "invalid token",
            SyntaxKind::Eof => "end of input",
        }
    }
}
