//! Comment-preserving document model
//!
//! A parsed file is a tree of [`Value`]s. Every node owns its children and
//! the comments attached to them, so moving a member or element from one
//! tree to another carries its comments along.

mod array;
mod comments;
mod object;
mod value;

use std::path::{Path, PathBuf};

pub use array::{Array, Element};
pub use comments::{Comments, is_line_comment};
pub use object::{Key, Member, Object};
pub use value::{Scalar, ScalarKind, Value, ValueKind};

/// How a container was laid out in its source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Opening and closing brackets on one line
    Inline,
    /// One item per line
    #[default]
    Block,
}

/// A parsed file: the root object plus its surrounding comments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: Option<PathBuf>,
    /// Comments before the root object
    pub before: Vec<String>,
    /// Comments after the root object
    pub after: Vec<String>,
    pub root: Object,
}

impl Document {
    /// A document with an empty root and no source path
    pub fn empty() -> Self {
        Self::new(Object::new())
    }

    pub fn new(root: Object) -> Self {
        Self {
            path: None,
            before: Vec::new(),
            after: Vec::new(),
            root,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Path for messages
    ///
    /// Only synthesized documents lack a path; they render as `<empty base>`.
    pub fn display_path(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => "<empty base>".to_string(),
        }
    }

    /// Sort the root's members by key text
    ///
    /// Only the top level is reordered; nested objects and arrays keep their
    /// order.
    pub fn sort_members(&mut self) {
        self.root.sort_by_key();
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}
