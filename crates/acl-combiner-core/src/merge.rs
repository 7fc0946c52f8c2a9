//! Merge engine: folds fragment documents into a base document
//!
//! For every fragment, each configured section found in it is moved into
//! the base: array values are appended after the base's values, object
//! members are appended after the base's members (no key-aware merge, so a
//! key may end up present twice). A section missing from the base is created.
//! Anything a fragment still holds after all configured sections were taken
//! out is an unsupported section and stops the merge.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::document::{Array, Comments, Document, Member, Object, Value};
use crate::sections::{SectionMap, SectionShape};
use crate::{CombinerError, Result};

/// What a merge did, for progress summaries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Fragments merged
    pub fragments: usize,
    /// Values or members appended per section, in first-touched order
    pub appended: IndexMap<String, usize>,
}

impl MergeReport {
    /// Total values and members appended across all sections
    pub fn total_appended(&self) -> usize {
        self.appended.values().sum()
    }

    fn record(&mut self, section: &str, count: usize) {
        *self.appended.entry(section.to_string()).or_default() += count;
    }
}

/// Merge every fragment into `base`, in order
///
/// Fragments are consumed: their section values move into the base with
/// their comments. The first error aborts the merge; `base` may then hold
/// the sections merged so far and should be discarded.
pub fn merge_documents(
    sections: &SectionMap,
    base: &mut Document,
    fragments: impl IntoIterator<Item = Document>,
) -> Result<MergeReport> {
    let mut report = MergeReport::default();

    for fragment in fragments {
        merge_fragment(sections, base, fragment, &mut report)?;
        report.fragments += 1;
    }

    Ok(report)
}

fn merge_fragment(
    sections: &SectionMap,
    base: &mut Document,
    mut fragment: Document,
    report: &mut MergeReport,
) -> Result<()> {
    let fragment_path = fragment.display_path();

    for (name, shape) in sections.iter() {
        let Some(index) = fragment.root.index_of(name) else {
            continue;
        };

        let count = match shape {
            SectionShape::Array => {
                let member = fragment.root.remove_at(index);
                merge_array(base, name, member, &fragment_path)?
            }
            SectionShape::Object => {
                let member = fragment.root.remove_at(index);
                merge_object(base, name, member, &fragment_path)?
            }
            SectionShape::Unsupported(_) => {
                return Err(CombinerError::classifier_error(
                    name,
                    shape.clone(),
                    base.display_path(),
                ));
            }
        };

        debug!("Appended {count} entries to [{name}] from [{fragment_path}]");
        report.record(name, count);
    }

    if let Some(remaining) = fragment.root.members.first() {
        return Err(CombinerError::unsupported_section(
            remaining.key.text(),
            fragment_path,
        ));
    }

    info!("Merged [{fragment_path}]");
    Ok(())
}

fn merge_array(
    base: &mut Document,
    name: &str,
    member: Member,
    fragment_path: &str,
) -> Result<usize> {
    let Member {
        comments,
        key,
        value,
    } = member;
    let mut incoming = match value {
        Value::Array(array) => array,
        other => {
            return Err(CombinerError::shape_mismatch(
                name,
                SectionShape::Array,
                other.kind(),
                fragment_path,
            ));
        }
    };
    let count = incoming.len();

    let base_path = base.display_path();
    match base.root.find_mut(name) {
        Some(existing) => match &mut existing.value {
            Value::Array(target) => {
                let first = incoming.elements.first_mut().map(|e| &mut e.comments);
                carry_comments(comments, first, &mut incoming.end);
                target.extend(incoming);
            }
            other => {
                return Err(CombinerError::shape_mismatch(
                    name,
                    SectionShape::Array,
                    other.kind(),
                    base_path,
                ));
            }
        },
        None => {
            let mut target = Array::new();
            target.extend(incoming);
            base.root.push(Member {
                comments,
                key,
                value: Value::Array(target),
            });
        }
    }

    Ok(count)
}

fn merge_object(
    base: &mut Document,
    name: &str,
    member: Member,
    fragment_path: &str,
) -> Result<usize> {
    let Member {
        comments,
        key,
        value,
    } = member;
    let mut incoming = match value {
        Value::Object(object) => object,
        other => {
            return Err(CombinerError::shape_mismatch(
                name,
                SectionShape::Object,
                other.kind(),
                fragment_path,
            ));
        }
    };
    let count = incoming.len();

    let base_path = base.display_path();
    match base.root.find_mut(name) {
        Some(existing) => match &mut existing.value {
            Value::Object(target) => {
                let first = incoming.members.first_mut().map(|m| &mut m.comments);
                carry_comments(comments, first, &mut incoming.end);
                append_members(target, incoming);
            }
            other => {
                return Err(CombinerError::shape_mismatch(
                    name,
                    SectionShape::Object,
                    other.kind(),
                    base_path,
                ));
            }
        },
        None => {
            let mut target = Object::new();
            append_members(&mut target, incoming);
            base.root.push(Member {
                comments,
                key,
                value: Value::Object(target),
            });
        }
    }

    Ok(count)
}

/// Naive append: members with keys already in `target` are added again
fn append_members(target: &mut Object, incoming: Object) {
    target.members.extend(incoming.members);
    target.end.extend(incoming.end);
}

/// Move the comments of a consumed section key onto the first value it
/// brought along, or onto the container's end comments when it was empty
fn carry_comments(comments: Comments, first: Option<&mut Comments>, end: &mut Vec<String>) {
    let Comments {
        mut before, line, ..
    } = comments;
    before.extend(line);
    if before.is_empty() {
        return;
    }

    match first {
        Some(first) => {
            before.append(&mut first.before);
            first.before = before;
        }
        None => {
            before.append(end);
            *end = before;
        }
    }
}
