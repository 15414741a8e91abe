//! layout
//!
//! Lane layout for single-parent revision histories.
//!
//! # Pipeline
//!
//! 1. [`AncestryIndex`] - id and children lookups, missing parents
//! 2. [`trunk`] - ancestry chain of the current revision
//! 3. [`order`] - oldest-first processing order
//! 4. [`lanes`] - lane allocation
//! 5. [`markers`] - stubs for missing parents
//!
//! Every call computes the layout from scratch and holds no state between
//! calls.
//!
//! # Example
//!
//! ```
//! use revlane::core::types::{Revision, RevisionId, SortOrder};
//! use revlane::layout::build_revision_tree_layout;
//!
//! let revisions = vec![
//!     Revision::root("root", "2024-01-01T00:00:00Z").unwrap(),
//!     Revision::child("a", "root", "2024-01-02T00:00:00Z").unwrap(),
//!     Revision::child("b", "root", "2024-01-03T00:00:00Z").unwrap(),
//! ];
//!
//! let current = RevisionId::new("b").unwrap();
//! let layout = build_revision_tree_layout(&revisions, SortOrder::Desc, Some(&current));
//!
//! assert_eq!(layout.lane_count, 2);
//! assert_eq!(layout.lane_of(&current), Some(0));
//! assert_eq!(layout.nodes[0].id(), &current);
//! ```

pub mod lanes;
pub mod markers;
pub mod order;
pub mod trunk;

pub use markers::{get_missing_parent_markers, MissingParentMarker};

use std::collections::BTreeSet;

use serde::Serialize;

use crate::core::graph::AncestryIndex;
use crate::core::types::{Revision, RevisionId, SortOrder};

/// A revision with its assigned lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaidOutNode {
    #[serde(flatten)]
    pub revision: Revision,
    pub lane: usize,
    /// The parent id is set but not among the supplied revisions
    pub is_missing_parent: bool,
}

impl LaidOutNode {
    pub fn id(&self) -> &RevisionId {
        self.revision.id()
    }

    pub fn parent_id(&self) -> Option<&RevisionId> {
        self.revision.parent_id()
    }
}

/// The complete layout of a revision history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionTreeLayout {
    /// Every input revision, in the requested display order
    pub nodes: Vec<LaidOutNode>,
    /// `max(lane) + 1`; 1 for an empty history
    pub lane_count: usize,
    /// Parent ids referenced but not supplied
    pub missing_parent_ids: BTreeSet<RevisionId>,
    /// Ids on the current revision's ancestry chain
    pub trunk_ids: BTreeSet<RevisionId>,
}

impl RevisionTreeLayout {
    /// Lane of a revision, if present.
    pub fn lane_of(&self, id: &RevisionId) -> Option<usize> {
        self.nodes.iter().find(|n| n.id() == id).map(|n| n.lane)
    }

    /// Markers for every missing parent, in display order.
    pub fn missing_parent_markers(&self) -> Vec<MissingParentMarker> {
        get_missing_parent_markers(&self.nodes)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Lay out `revisions` in lanes.
///
/// The ancestry chain of `current_revision_id` is kept in lane 0. Without a
/// current id, or with one that matches no revision, the oldest root takes
/// lane 0 instead. Missing parents are reported, never treated as errors.
pub fn build_revision_tree_layout(
    revisions: &[Revision],
    sort_order: SortOrder,
    current_revision_id: Option<&RevisionId>,
) -> RevisionTreeLayout {
    let mut index = AncestryIndex::build(revisions);
    order::sort_children(&mut index);

    let processing = order::processing_order(revisions);
    let trunk = trunk::resolve_trunk(&index, current_revision_id);
    let assignment = lanes::allocate_lanes(&index, &trunk, &processing);

    let nodes: Vec<LaidOutNode> = processing
        .iter()
        .map(|revision| LaidOutNode {
            revision: (*revision).clone(),
            lane: assignment.lane_of(revision.id()).unwrap_or_default(),
            is_missing_parent: index.is_missing_parent(revision),
        })
        .collect();

    let lane_count = nodes.iter().map(|n| n.lane).max().map_or(1, |max| max + 1);

    RevisionTreeLayout {
        nodes: order::into_display_order(nodes, sort_order),
        lane_count,
        missing_parent_ids: index.missing_parent_ids().clone(),
        trunk_ids: trunk.ids().cloned().collect(),
    }
}
