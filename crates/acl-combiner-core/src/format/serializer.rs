//! Lowering documents to format elements
//!
//! Layout rules:
//!
//! - empty containers without end comments print as `{}` and `[]`
//! - a container written on one line in its source prints on one line again,
//!   as long as neither it nor anything inside it carries comments
//! - everything else prints one item per line, each followed by a comma
//! - the root object is never printed on one line unless it is empty
//!
//! Printing the result and parsing it back yields a document that prints
//! to the very same text.

use super::format_element::{
    FormatElement, dedent, hard_line_break, indent, space, text, token,
};
use super::printer::{Printer, PrinterOptions};
use crate::document::{Array, Comments, Document, Layout, Object, Value};

/// Render a document as HuJSON text, ending with exactly one newline
pub fn serialize(document: &Document, options: &PrinterOptions) -> String {
    let elements = format_document(document);
    let mut output = Printer::new(options.clone()).print(&elements);
    output.push('\n');
    output
}

/// Lower a document into format elements
pub fn format_document(document: &Document) -> Vec<FormatElement> {
    let mut out = Vec::new();

    for comment in &document.before {
        out.push(text(comment));
        out.push(hard_line_break());
    }

    format_object(&document.root, true, &mut out);

    for comment in &document.after {
        out.push(hard_line_break());
        out.push(text(comment));
    }

    out
}

fn format_value(value: &Value, out: &mut Vec<FormatElement>) {
    match value {
        Value::Object(object) => format_object(object, false, out),
        Value::Array(array) => format_array(array, out),
        Value::Scalar(scalar) => out.push(text(scalar.raw())),
    }
}

fn format_object(object: &Object, is_root: bool, out: &mut Vec<FormatElement>) {
    if object.is_empty() && object.end.is_empty() {
        out.push(token("{}"));
        return;
    }

    if !is_root && object_fits_on_one_line(object) {
        out.push(token("{"));
        for (i, member) in object.iter().enumerate() {
            if i > 0 {
                out.push(token(","));
                out.push(space());
            }
            out.push(text(member.key.raw()));
            out.push(token(":"));
            out.push(space());
            format_value(&member.value, out);
        }
        out.push(token("}"));
        return;
    }

    out.push(token("{"));
    out.push(indent());
    for (i, member) in object.iter().enumerate() {
        open_item(&member.comments, i, out);

        out.push(text(member.key.raw()));
        for comment in &member.key.comments {
            out.push(space());
            out.push(text(comment));
        }
        out.push(token(":"));
        out.push(space());
        format_value(&member.value, out);

        close_item(&member.comments, out);
    }
    close_block(&object.end, "}", out);
}

fn format_array(array: &Array, out: &mut Vec<FormatElement>) {
    if array.is_empty() && array.end.is_empty() {
        out.push(token("[]"));
        return;
    }

    if array_fits_on_one_line(array) {
        out.push(token("["));
        for (i, element) in array.iter().enumerate() {
            if i > 0 {
                out.push(token(","));
                out.push(space());
            }
            format_value(&element.value, out);
        }
        out.push(token("]"));
        return;
    }

    out.push(token("["));
    out.push(indent());
    for (i, element) in array.iter().enumerate() {
        open_item(&element.comments, i, out);
        format_value(&element.value, out);
        close_item(&element.comments, out);
    }
    close_block(&array.end, "]", out);
}

/// Start a new line for an item: paragraph break, then leading comments
fn open_item(comments: &Comments, index: usize, out: &mut Vec<FormatElement>) {
    out.push(hard_line_break());
    if comments.blank_line && index > 0 {
        out.push(hard_line_break());
    }
    for comment in &comments.before {
        out.push(text(comment));
        out.push(hard_line_break());
    }
}

/// Trailing comma, then the comments that share the item's line
fn close_item(comments: &Comments, out: &mut Vec<FormatElement>) {
    out.push(token(","));
    for comment in &comments.line {
        out.push(space());
        out.push(text(comment));
    }
}

fn close_block(end: &[String], bracket: &'static str, out: &mut Vec<FormatElement>) {
    for comment in end {
        out.push(hard_line_break());
        out.push(text(comment));
    }
    out.push(dedent());
    out.push(hard_line_break());
    out.push(token(bracket));
}

fn fits_on_one_line(value: &Value) -> bool {
    match value {
        Value::Scalar(_) => true,
        Value::Object(object) => object_fits_on_one_line(object),
        Value::Array(array) => array_fits_on_one_line(array),
    }
}

fn object_fits_on_one_line(object: &Object) -> bool {
    object.layout == Layout::Inline
        && !object.has_direct_comments()
        && object.iter().all(|m| fits_on_one_line(&m.value))
}

fn array_fits_on_one_line(array: &Array) -> bool {
    array.layout == Layout::Inline
        && !array.has_direct_comments()
        && array.values().all(fits_on_one_line)
}
