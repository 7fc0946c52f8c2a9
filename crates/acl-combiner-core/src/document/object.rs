//! Objects: ordered member lists with key lookup

use std::cmp::Ordering;

use super::value::quote;
use super::{Comments, Layout, Value};

/// An object key
///
/// Keeps the source token so escapes print back unchanged, while lookups and
/// ordering use only the decoded text: `"tag\u003aprod"` and `"tag:prod"`
/// are the same key.
#[derive(Debug, Clone)]
pub struct Key {
    raw: String,
    text: String,
    /// Block comments between the key and its value
    pub comments: Vec<String>,
}

impl Key {
    /// Key for `text`, quoted as a JSON string
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            raw: quote(&text),
            text,
            comments: Vec::new(),
        }
    }

    /// Build from a validated source token and its decoded text
    pub(crate) fn from_raw(raw: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            text: text.into(),
            comments: Vec::new(),
        }
    }

    /// Decoded key text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Source token, quotes included
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl From<&str> for Key {
    fn from(text: &str) -> Self {
        Key::new(text)
    }
}

/// A key/value pair owned by exactly one object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub comments: Comments,
    pub key: Key,
    pub value: Value,
}

impl Member {
    pub fn new(key: impl Into<Key>, value: impl Into<Value>) -> Self {
        Self {
            comments: Comments::default(),
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn with_comments(mut self, comments: Comments) -> Self {
        self.comments = comments;
        self
    }
}

/// An ordered list of members
///
/// The model itself does not reject duplicate keys; `push` appends blindly
/// and callers that need uniqueness look the key up first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Object {
    pub members: Vec<Member>,
    /// Comments after the last member, before `}`
    pub end: Vec<String>,
    pub layout: Layout,
}

impl Object {
    /// Create an empty multi-line object
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the first member whose key text equals `key`
    pub fn find(&self, key: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.key.text() == key)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| m.key.text() == key)
    }

    /// Position of the first member whose key text equals `key`
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.members.iter().position(|m| m.key.text() == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    /// Append a member at the end
    pub fn push(&mut self, member: Member) {
        self.members.push(member);
    }

    /// Replace the member at `index`, returning the previous one
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn replace(&mut self, index: usize, member: Member) -> Member {
        std::mem::replace(&mut self.members[index], member)
    }

    /// Remove the member at `index`, shifting later members down
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> Member {
        self.members.remove(index)
    }

    /// Remove and return the member with key `key`; absent keys leave the
    /// object untouched
    pub fn remove(&mut self, key: &str) -> Option<Member> {
        self.index_of(key).map(|index| self.members.remove(index))
    }

    /// Stable sort of members by key text
    pub fn sort_by_key(&mut self) {
        self.members.sort_by(|a, b| a.key.cmp(&b.key));
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Member> {
        self.members.iter()
    }

    /// Key texts in member order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.key.text())
    }

    /// Check if the object or any of its members carry comments
    pub(crate) fn has_direct_comments(&self) -> bool {
        !self.end.is_empty()
            || self
                .members
                .iter()
                .any(|m| m.comments.has_comments() || !m.key.comments.is_empty())
    }
}

impl FromIterator<Member> for Object {
    fn from_iter<I: IntoIterator<Item = Member>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = &'a Member;
    type IntoIter = std::slice::Iter<'a, Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Scalar;

    fn object(keys: &[&str]) -> Object {
        keys.iter()
            .map(|k| Member::new(*k, Scalar::string(k)))
            .collect()
    }

    #[test]
    fn test_find_and_index_of() {
        let obj = object(&["acls", "groups"]);
        assert_eq!(obj.index_of("groups"), Some(1));
        assert_eq!(obj.index_of("ssh"), None);
        assert!(obj.find("acls").is_some());
        assert!(obj.find("ssh").is_none());
    }

    #[test]
    fn test_key_equality_uses_decoded_text() {
        let escaped = Key::from_raw(r#""tag\u003aprod""#, "tag:prod");
        assert_eq!(escaped, Key::new("tag:prod"));
        assert_eq!(escaped.raw(), r#""tag\u003aprod""#);

        let mut obj = Object::new();
        obj.push(Member::new(escaped, Scalar::null()));
        assert_eq!(obj.index_of("tag:prod"), Some(0));
    }

    #[test]
    fn test_remove_absent_key_leaves_members() {
        let mut obj = object(&["goodpath"]);
        assert!(obj.remove("NOTHING_TO_REMOVE").is_none());
        assert_eq!(obj.len(), 1);

        let removed = obj.remove("goodpath").map(|m| m.key.text().to_string());
        assert_eq!(removed.as_deref(), Some("goodpath"));
        assert!(obj.is_empty());
    }

    #[test]
    fn test_remove_at_keeps_order() {
        let mut obj = object(&["a", "b", "c"]);
        let removed = obj.remove_at(1);
        assert_eq!(removed.key.text(), "b");
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn test_replace_in_place() {
        let mut obj = object(&["a", "b"]);
        let old = obj.replace(0, Member::new("z", Scalar::null()));
        assert_eq!(old.key.text(), "a");
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["z", "b"]);
    }

    #[test]
    fn test_push_allows_duplicates() {
        let mut obj = object(&["k2"]);
        obj.push(Member::new("k2", Scalar::null()));
        assert_eq!(obj.len(), 2);
        assert_eq!(obj.index_of("k2"), Some(0));
    }

    #[test]
    fn test_sort_is_stable() {
        let mut obj = Object::new();
        obj.push(Member::new("b", Scalar::number(1)));
        obj.push(Member::new("a", Scalar::number(2)));
        obj.push(Member::new("b", Scalar::number(3)));
        obj.sort_by_key();

        let raws: Vec<_> = obj
            .iter()
            .map(|m| m.value.as_scalar().map(|s| s.raw().to_string()))
            .collect();
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "b", "b"]);
        assert_eq!(
            raws,
            vec![Some("2".into()), Some("1".into()), Some("3".into())]
        );
    }
}
