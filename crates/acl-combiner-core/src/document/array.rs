//! Arrays: ordered value lists

use super::{Comments, Layout, Value};

/// An array entry with the comments around it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub comments: Comments,
    pub value: Value,
}

impl Element {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            comments: Comments::default(),
            value: value.into(),
        }
    }
}

/// An ordered list of values; no uniqueness constraint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Array {
    pub elements: Vec<Element>,
    /// Comments after the last element, before `]`
    pub end: Vec<String>,
    pub layout: Layout,
}

impl Array {
    /// Create an empty multi-line array
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.elements.push(Element::new(value));
    }

    pub fn push_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Move every element of `other` to the end of this array
    ///
    /// Relative order is preserved. Comments that closed `other` are kept as
    /// closing comments of this array.
    pub fn extend(&mut self, other: Array) {
        self.elements.extend(other.elements);
        self.end.extend(other.end);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.elements.iter().map(|e| &e.value)
    }

    pub(crate) fn has_direct_comments(&self) -> bool {
        !self.end.is_empty() || self.elements.iter().any(|e| e.comments.has_comments())
    }
}

impl<V: Into<Value>> FromIterator<V> for Array {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().map(Element::new).collect(),
            ..Self::default()
        }
    }
}
