//! Comments attached to document nodes

/// Comments and spacing that travel with a member or array element
///
/// Comment texts are stored verbatim, delimiters included (`// note`,
/// `/* note */`), so they print back exactly as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comments {
    /// Comments on their own lines before the item
    pub before: Vec<String>,
    /// Comments on the same line after the item
    pub line: Vec<String>,
    /// An empty line separated the item from whatever preceded it
    pub blank_line: bool,
}

impl Comments {
    /// Comments with only leading lines
    pub fn before(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            before: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Check if any comment text is present
    pub fn has_comments(&self) -> bool {
        !self.before.is_empty() || !self.line.is_empty()
    }
}

/// Whether a comment runs to the end of its line
pub fn is_line_comment(text: &str) -> bool {
    text.starts_with("//")
}
