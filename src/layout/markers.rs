//! layout::markers
//!
//! Dangling-edge markers for parents outside the supplied revisions.

use std::collections::HashSet;

use serde::Serialize;

use crate::core::types::RevisionId;

use super::LaidOutNode;

/// A stub connector to draw where a revision points at a missing parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingParentMarker {
    pub parent_id: RevisionId,
    pub lane: usize,
}

impl MissingParentMarker {
    /// Stable key for the marker: `"{parent_id}-{lane}"`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.parent_id, self.lane)
    }
}

/// One marker per distinct `(parent_id, lane)` among nodes with a missing
/// parent, in the order the nodes are given.
///
/// # Example
///
/// ```
/// use revlane::core::types::{Revision, SortOrder};
/// use revlane::layout::{build_revision_tree_layout, get_missing_parent_markers};
///
/// let revisions = vec![
///     Revision::child("a", "gone", "1").unwrap(),
///     Revision::child("b", "gone", "2").unwrap(),
/// ];
/// let layout = build_revision_tree_layout(&revisions, SortOrder::Asc, None);
///
/// let keys: Vec<_> = get_missing_parent_markers(&layout.nodes)
///     .iter()
///     .map(|m| m.key())
///     .collect();
/// assert_eq!(keys, vec!["gone-0", "gone-1"]);
/// ```
pub fn get_missing_parent_markers(nodes: &[LaidOutNode]) -> Vec<MissingParentMarker> {
    let mut seen: HashSet<(&RevisionId, usize)> = HashSet::new();
    let mut markers = Vec::new();

    for node in nodes.iter().filter(|n| n.is_missing_parent) {
        let Some(parent_id) = node.parent_id() else {
            continue;
        };
        if seen.insert((parent_id, node.lane)) {
            markers.push(MissingParentMarker {
                parent_id: parent_id.clone(),
                lane: node.lane,
            });
        }
    }

    markers
}
