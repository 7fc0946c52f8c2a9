//! Rendering documents back to HuJSON text

pub mod format_element;
mod printer;
mod serializer;

pub use format_element::FormatElement;
pub use printer::{Printer, PrinterOptions};
pub use serializer::{format_document, serialize};
