//! Error types and handling for policy combining operations

use std::path::PathBuf;
use thiserror::Error;

use crate::document::ValueKind;
use crate::sections::SectionShape;

/// Main error type for combining operations
///
/// Every variant is fatal: the run stops at the first error and no output is
/// written.
#[derive(Debug, Error)]
pub enum CombinerError {
    /// Input text is not well-formed HuJSON
    #[error("error parsing {path}: {message} at line {line}, column {column}")]
    ParseError {
        path: String,
        line: usize,
        column: usize,
        message: String,
    },

    /// Document root is not an object
    #[error("invalid file format in {path}: document root is {found}, expected object")]
    SchemaError { path: String, found: ValueKind },

    /// A classifier entry declares a shape the merge engine cannot handle
    #[error("unexpected type [{shape}] for [\"{section}\"] from file [{path}]")]
    ClassifierError {
        section: String,
        shape: SectionShape,
        path: String,
    },

    /// A fragment carries a top-level key the classifier does not know
    #[error("unsupported section [\"{section}\"] in file [{path}]")]
    UnsupportedSection { section: String, path: String },

    /// A section value does not have the shape the classifier declares
    #[error("section [\"{section}\"] in file [{path}] is {found}, expected {expected}")]
    SectionShapeMismatch {
        section: String,
        expected: SectionShape,
        found: ValueKind,
        path: String,
    },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Schema,
    Classifier,
    UnsupportedSection,
    ShapeMismatch,
    Config,
    Io,
}

impl CombinerError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CombinerError::ParseError { .. } => ErrorKind::Parse,
            CombinerError::SchemaError { .. } => ErrorKind::Schema,
            CombinerError::ClassifierError { .. } => ErrorKind::Classifier,
            CombinerError::UnsupportedSection { .. } => ErrorKind::UnsupportedSection,
            CombinerError::SectionShapeMismatch { .. } => ErrorKind::ShapeMismatch,
            CombinerError::ConfigError { .. } => ErrorKind::Config,
            CombinerError::IoError { .. } => ErrorKind::Io,
        }
    }

    /// Create a parse error
    pub fn parse_error(
        path: impl Into<String>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::ParseError {
            path: path.into(),
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a schema error for a non-object document root
    pub fn schema_error(path: impl Into<String>, found: ValueKind) -> Self {
        Self::SchemaError {
            path: path.into(),
            found,
        }
    }

    /// Create a classifier error
    pub fn classifier_error(
        section: impl Into<String>,
        shape: SectionShape,
        path: impl Into<String>,
    ) -> Self {
        Self::ClassifierError {
            section: section.into(),
            shape,
            path: path.into(),
        }
    }

    /// Create an unsupported section error
    pub fn unsupported_section(section: impl Into<String>, path: impl Into<String>) -> Self {
        Self::UnsupportedSection {
            section: section.into(),
            path: path.into(),
        }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(
        section: impl Into<String>,
        expected: SectionShape,
        found: ValueKind,
        path: impl Into<String>,
    ) -> Self {
        Self::SectionShapeMismatch {
            section: section.into(),
            expected,
            found,
            path: path.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for CombinerError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = CombinerError::unsupported_section("hosts", "frag/a.hujson");
        assert_eq!(err.kind(), ErrorKind::UnsupportedSection);

        let err = CombinerError::schema_error("frag/a.hujson", ValueKind::Array);
        assert_eq!(err.kind(), ErrorKind::Schema);

        let err = CombinerError::from(std::io::Error::other("boom"));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_messages_name_path_and_key() {
        let err = CombinerError::unsupported_section("hosts", "frag/a.hujson");
        assert_eq!(
            err.to_string(),
            "unsupported section [\"hosts\"] in file [frag/a.hujson]"
        );

        let err = CombinerError::schema_error("frag/b.json", ValueKind::Array);
        assert_eq!(
            err.to_string(),
            "invalid file format in frag/b.json: document root is array, expected object"
        );

        let err = CombinerError::classifier_error(
            "acls",
            SectionShape::Unsupported("List".to_string()),
            "policy.hujson",
        );
        assert_eq!(
            err.to_string(),
            "unexpected type [List] for [\"acls\"] from file [policy.hujson]"
        );
    }

    #[test]
    fn test_parse_error_message() {
        let err = CombinerError::parse_error("a.hujson", 3, 7, "expected ':'");
        assert_eq!(
            err.to_string(),
            "error parsing a.hujson: expected ':' at line 3, column 7"
        );
    }
}
