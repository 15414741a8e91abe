//! layout::order
//!
//! Chronological traversal order.
//!
//! Lane allocation always walks revisions oldest first. The caller's
//! [`SortOrder`] only decides how the finished nodes are sequenced, so the
//! same input yields the same lanes whichever way it is displayed.

use crate::core::graph::AncestryIndex;
use crate::core::types::{Revision, SortOrder};

/// Revisions sorted oldest first.
///
/// The sort is stable: revisions with equal timestamps keep their input
/// order.
pub fn processing_order(revisions: &[Revision]) -> Vec<&Revision> {
    let mut ordered: Vec<&Revision> = revisions.iter().collect();
    ordered.sort_by(|a, b| a.timestamp().cmp(b.timestamp()));
    ordered
}

/// Re-sort every children list of the index oldest first.
pub fn sort_children(index: &mut AncestryIndex<'_>) {
    for children in index.children_mut() {
        children.sort_by(|a, b| a.timestamp().cmp(b.timestamp()));
    }
}

/// Re-sequence items held in processing order into display order.
pub fn into_display_order<T>(mut items: Vec<T>, order: SortOrder) -> Vec<T> {
    if order == SortOrder::Desc {
        items.reverse();
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RevisionId;

    fn ids(revisions: &[&Revision]) -> Vec<String> {
        revisions.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn sorts_oldest_first() {
        let revisions = vec![
            Revision::root("c", "2024-03-01T00:00:00Z").unwrap(),
            Revision::root("a", "2024-01-01T00:00:00Z").unwrap(),
            Revision::root("b", "2024-02-01T00:00:00Z").unwrap(),
        ];
        assert_eq!(ids(&processing_order(&revisions)), vec!["a", "b", "c"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let revisions = vec![
            Revision::root("second", "2024-01-01T00:00:00Z").unwrap(),
            Revision::root("first", "2024-01-01T00:00:00Z").unwrap(),
        ];
        assert_eq!(
            ids(&processing_order(&revisions)),
            vec!["second", "first"]
        );
    }

    #[test]
    fn children_sorted_chronologically() {
        let revisions = vec![
            Revision::root("root", "1").unwrap(),
            Revision::child("late", "root", "3").unwrap(),
            Revision::child("early", "root", "2").unwrap(),
        ];
        let mut index = AncestryIndex::build(&revisions);
        sort_children(&mut index);

        let root = RevisionId::new("root").unwrap();
        assert_eq!(ids(index.children(&root)), vec!["early", "late"]);
    }

    #[test]
    fn display_order() {
        assert_eq!(into_display_order(vec![1, 2, 3], SortOrder::Asc), vec![1, 2, 3]);
        assert_eq!(into_display_order(vec![1, 2, 3], SortOrder::Desc), vec![3, 2, 1]);
    }
}
