//! Loading HuJSON files into documents

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::document::{Document, Value};
use crate::syntax::parse;
use crate::{CombinerError, Result};

/// Parse `source` as the contents of the file at `path`
///
/// The path is only used to label the document and its errors.
pub fn load_str(source: &str, path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let tree = parse(source).map_err(|err| {
        let (line, column) = line_column(source, err.span.start);
        CombinerError::parse_error(&display, line, column, err.message)
    })?;

    let root = match tree.value {
        Value::Object(object) => object,
        other => return Err(CombinerError::schema_error(display, other.kind())),
    };

    let mut document = Document::new(root).with_path(path);
    document.before = tree.before;
    document.after = tree.after;
    Ok(document)
}

/// Read everything from `reader` and parse it
///
/// Input that is not UTF-8 is a parse error at the first invalid byte.
pub fn load_reader(mut reader: impl Read, path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| CombinerError::io_error(path, e))?;

    match String::from_utf8(bytes) {
        Ok(source) => load_str(&source, path),
        Err(err) => {
            let valid_up_to = err.utf8_error().valid_up_to();
            let valid = String::from_utf8_lossy(&err.as_bytes()[..valid_up_to]);
            let (line, column) = line_column(&valid, valid.len());
            Err(CombinerError::parse_error(
                path.display().to_string(),
                line,
                column,
                "invalid UTF-8",
            ))
        }
    }
}

/// Open and parse the file at `path`
pub fn load_file(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    info!("Parsing [{}]...", path.display());

    let file = File::open(path).map_err(|e| CombinerError::io_error(path, e))?;
    load_reader(file, path)
}

/// 1-based line and column of a byte offset
fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }

    let prefix = &source[..offset];
    let line = prefix.matches('\n').count() + 1;
    let line_start = prefix.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = prefix[line_start..].chars().count() + 1;
    (line, column)
}
