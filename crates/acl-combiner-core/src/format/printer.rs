//! Printer for converting FormatElement IR to text

use serde::{Deserialize, Serialize};

use super::format_element::FormatElement;

/// Printer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrinterOptions {
    /// Number of spaces per indentation level when not using tabs
    pub indent_size: usize,

    /// Whether to indent with one tab per level
    pub use_tabs: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent_size: 2,
            use_tabs: true,
        }
    }
}

impl PrinterOptions {
    /// Indent with `size` spaces per level
    pub fn spaces(size: usize) -> Self {
        Self {
            indent_size: size,
            use_tabs: false,
        }
    }
}

/// Writes format elements to a string
///
/// Indentation is written lazily, right before the first text of a line, so
/// empty lines never carry trailing whitespace.
pub struct Printer {
    options: PrinterOptions,
    buffer: String,
    indent_level: usize,
    pending_indent: bool,
}

impl Printer {
    pub fn new(options: PrinterOptions) -> Self {
        Self {
            options,
            buffer: String::with_capacity(4096),
            indent_level: 0,
            pending_indent: false,
        }
    }

    /// Print a sequence of format elements to a string
    pub fn print(&mut self, elements: &[FormatElement]) -> String {
        for element in elements {
            self.print_element(element);
        }
        self.pending_indent = false;
        std::mem::take(&mut self.buffer)
    }

    fn print_element(&mut self, element: &FormatElement) {
        match element {
            FormatElement::Token(token) => {
                self.flush_indent();
                self.buffer.push_str(token);
            }

            FormatElement::Text(text) => {
                self.flush_indent();
                self.buffer.push_str(text);
            }

            FormatElement::HardLineBreak => {
                self.buffer.push('\n');
                self.pending_indent = true;
            }

            FormatElement::Space => {
                self.flush_indent();
                self.buffer.push(' ');
            }

            FormatElement::Indent => {
                self.indent_level += 1;
            }

            FormatElement::Dedent => {
                self.indent_level = self.indent_level.saturating_sub(1);
            }
        }
    }

    /// Write the indentation owed to the current line, if any
    fn flush_indent(&mut self) {
        if !self.pending_indent {
            return;
        }
        self.pending_indent = false;

        if self.options.use_tabs {
            for _ in 0..self.indent_level {
                self.buffer.push('\t');
            }
        } else {
            let width = self.indent_level * self.options.indent_size;
            self.buffer.extend(std::iter::repeat_n(' ', width));
        }
    }
}
