//! Section classifier: which top-level keys are merged, and how

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Required shape of a section's value
///
/// Shape names come from configuration, so anything other than `Array` or
/// `Object` is kept as [`SectionShape::Unsupported`] and rejected when the
/// section is actually merged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionShape {
    /// Values are appended to the base list
    Array,
    /// Members are appended to the base object, duplicates included
    Object,
    Unsupported(String),
}

impl SectionShape {
    pub fn as_str(&self) -> &str {
        match self {
            SectionShape::Array => "Array",
            SectionShape::Object => "Object",
            SectionShape::Unsupported(name) => name,
        }
    }
}

impl FromStr for SectionShape {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SectionShape::from(s.to_string()))
    }
}

impl From<String> for SectionShape {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Array" => SectionShape::Array,
            "Object" => SectionShape::Object,
            _ => SectionShape::Unsupported(name),
        }
    }
}

impl From<SectionShape> for String {
    fn from(shape: SectionShape) -> Self {
        shape.as_str().to_string()
    }
}

impl fmt::Display for SectionShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered map from section name to shape
///
/// Merging walks the sections in this order, so the order decides which
/// sections of a fragment are consumed first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionMap {
    entries: IndexMap<String, SectionShape>,
}

impl SectionMap {
    /// An empty map; merging with it rejects every fragment section
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, shape: SectionShape) -> Option<SectionShape> {
        self.entries.insert(name.into(), shape)
    }

    pub fn get(&self, name: &str) -> Option<&SectionShape> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SectionShape)> {
        self.entries.iter().map(|(name, shape)| (name.as_str(), shape))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Add or replace shapes, keeping the position of replaced entries
    pub fn with_overrides<I, K>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, SectionShape)>,
        K: Into<String>,
    {
        for (name, shape) in extra {
            self.entries.insert(name.into(), shape);
        }
        self
    }
}

impl Default for SectionMap {
    /// The tailnet policy sections fragments may contribute
    ///
    /// `autoApprovers` is not among them.
    fn default() -> Self {
        [
            ("acls", SectionShape::Array),
            ("extraDNSRecords", SectionShape::Array),
            ("grants", SectionShape::Array),
            ("groups", SectionShape::Object),
            ("nodeAttrs", SectionShape::Array),
            ("postures", SectionShape::Object),
            ("ssh", SectionShape::Array),
            ("tagOwners", SectionShape::Object),
            ("tests", SectionShape::Array),
        ]
        .into_iter()
        .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, SectionShape)> for SectionMap {
    fn from_iter<I: IntoIterator<Item = (K, SectionShape)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, shape)| (name.into(), shape))
                .collect(),
        }
    }
}

/// Keep only the sections whose name is in `allowed`
///
/// Names in `allowed` that `defined` does not know are ignored.
pub fn allowed_sections<S: AsRef<str>>(allowed: &[S], defined: &SectionMap) -> SectionMap {
    defined
        .iter()
        .filter(|(name, _)| allowed.iter().any(|a| a.as_ref() == *name))
        .map(|(name, shape)| (name, shape.clone()))
        .collect()
}
