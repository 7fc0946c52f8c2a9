//! Format elements: the IR between the document tree and the printed text
//!
//! The serializer lowers a document into a flat list of elements and the
//! [`Printer`](super::Printer) turns that list into text. Keeping layout
//! decisions in the lowering step means the printer only has to track
//! indentation.
//!
//! # Example
//!
//! ```rust
//! use acl_combiner_core::format::{Printer, PrinterOptions};
//! use acl_combiner_core::format::format_element::{dedent, hard_line_break, indent, text, token};
//!
//! let elements = vec![
//!     token("["),
//!     indent(),
//!     hard_line_break(),
//!     text("\"tag:prod\""),
//!     token(","),
//!     dedent(),
//!     hard_line_break(),
//!     token("]"),
//! ];
//! let printed = Printer::new(PrinterOptions::default()).print(&elements);
//! assert_eq!(printed, "[\n\t\"tag:prod\",\n]");
//! ```

/// Building block of formatted output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatElement {
    /// Static punctuation: brackets, `:`, `,`
    ///
    /// Must be ASCII and must not contain line breaks or tabs.
    Token(&'static str),

    /// Source text: keys, scalars, comments
    ///
    /// Printed verbatim. Block comments may span lines; their inner lines are
    /// not re-indented so that they read back unchanged.
    Text(Box<str>),

    /// Always inserts a newline
    HardLineBreak,

    /// Single ASCII space
    Space,

    /// Increase indentation level
    Indent,

    /// Decrease indentation level
    Dedent,
}

/// Create a token for static, ASCII-only punctuation
///
/// # Panics
///
/// In debug builds, panics if `text` is not ASCII or contains newlines or
/// tabs.
pub fn token(text: &'static str) -> FormatElement {
    debug_assert!(text.is_ascii(), "Token must be ASCII only, got: {text:?}");
    debug_assert!(
        !text.contains(['\n', '\r', '\t']),
        "Token cannot contain newlines/tabs, use HardLineBreak/Space instead: {text:?}"
    );
    FormatElement::Token(text)
}

/// Create a text element from source content
pub fn text(text: &str) -> FormatElement {
    FormatElement::Text(text.into())
}

pub fn hard_line_break() -> FormatElement {
    FormatElement::HardLineBreak
}

pub fn space() -> FormatElement {
    FormatElement::Space
}

pub fn indent() -> FormatElement {
    FormatElement::Indent
}

pub fn dedent() -> FormatElement {
    FormatElement::Dedent
}
