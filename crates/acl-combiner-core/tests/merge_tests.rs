//! Merge behaviour on parsed documents
//!
//! Sections here are configured ad hoc, the way a caller embedding the
//! engine with its own policy layout would.

use acl_combiner_core::{
    CombinerError, Document, ErrorKind, SectionMap, SectionShape, allowed_sections, load_str,
    merge_documents,
};

fn doc(path: &str, source: &str) -> Document {
    load_str(source, path).unwrap()
}

fn goodpath_object() -> SectionMap {
    SectionMap::new().with_overrides([("goodpath", SectionShape::Object)])
}

fn member_count(doc: &Document, section: &str) -> usize {
    doc.root
        .find(section)
        .and_then(|m| m.value.as_object())
        .map(|o| o.len())
        .unwrap_or(0)
}

/// A fragment section lands in a base that only has comments
#[test]
fn test_merge_into_empty_parent() {
    let mut parent = doc("parent", "{\n\t// empty parent\n}");
    let child = doc("child", r#"{"goodpath": {"foo": "bar"}}"#);

    merge_documents(&goodpath_object(), &mut parent, [child]).unwrap();

    assert_eq!(parent.root.len(), 1);
    assert_eq!(parent.root.index_of("goodpath"), Some(0));
    assert_eq!(parent.root.end, vec!["// empty parent"]);
}

/// Unrelated base sections are left alone
#[test]
fn test_merge_parent_with_different_members() {
    let mut parent = doc("parent", r#"{"otherpath": {"foo": "bar", "bar": "foo"}}"#);
    let child = doc("child", r#"{"goodpath": {"foo": "bar"}}"#);

    merge_documents(&goodpath_object(), &mut parent, [child]).unwrap();

    assert_eq!(parent.root.len(), 2);
    assert_eq!(member_count(&parent, "otherpath"), 2);
}

/// Object sections grow in place
#[test]
fn test_merge_parent_with_same_member() {
    let mut parent = doc("parent", r#"{"goodpath": {"bar": "foo"}}"#);
    let child = doc("child", r#"{"goodpath": {"foo": "bar"}}"#);

    merge_documents(&goodpath_object(), &mut parent, [child]).unwrap();

    assert_eq!(parent.root.len(), 1);
    assert_eq!(parent.root.index_of("goodpath"), Some(0));
    assert_eq!(member_count(&parent, "goodpath"), 2);
}

/// Unknown top-level keys stop the merge and name the fragment
#[test]
fn test_unsupported_section_in_child() {
    let mut parent = doc("parent", "{}");
    let child = doc("child", r#"{"goodpath": {}, "badpath": []}"#);

    let err = merge_documents(&goodpath_object(), &mut parent, [child]).unwrap_err();

    match err {
        CombinerError::UnsupportedSection { section, path } => {
            assert_eq!(section, "badpath");
            assert_eq!(path, "child");
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// A key repeated inside one fragment only has its first copy merged
#[test]
fn test_duplicate_section_in_fragment_is_rejected() {
    let mut parent = doc("parent", "{}");
    let child = doc("child", r#"{"goodpath": {"a": 1}, "goodpath": {"b": 2}}"#);

    let err = merge_documents(&goodpath_object(), &mut parent, [child]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnsupportedSection);
}

#[test]
fn test_allowed_sections_filter() {
    let defined = SectionMap::new().with_overrides([
        ("1", SectionShape::Unsupported("foo".into())),
        ("2", SectionShape::Unsupported("foo".into())),
        ("3", SectionShape::Unsupported("foo".into())),
    ]);

    let allowed = allowed_sections(&["1", "2"], &defined);

    assert_eq!(allowed.get("1"), Some(&SectionShape::Unsupported("foo".into())));
    assert_eq!(allowed.get("2"), Some(&SectionShape::Unsupported("foo".into())));
    assert_eq!(allowed.get("3"), None);
    assert_eq!(allowed.get("Z"), None);
}

/// The final sort depends only on the key set, not on merge history
#[test]
fn test_final_order_independent_of_fragment_order() {
    let fragments = || {
        vec![
            doc("a", r#"{"tests": [1]}"#),
            doc("b", r#"{"groups": {"group:a": []}}"#),
            doc("c", r#"{"acls": [2]}"#),
        ]
    };

    let mut forward = Document::empty();
    merge_documents(&SectionMap::default(), &mut forward, fragments()).unwrap();
    forward.sort_members();

    let mut reversed = Document::empty();
    let mut backwards = fragments();
    backwards.reverse();
    merge_documents(&SectionMap::default(), &mut reversed, backwards).unwrap();
    reversed.sort_members();

    let keys = |d: &Document| d.root.keys().map(str::to_string).collect::<Vec<_>>();
    assert_eq!(keys(&forward), vec!["acls", "groups", "tests"]);
    assert_eq!(keys(&forward), keys(&reversed));
}
