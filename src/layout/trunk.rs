//! layout::trunk
//!
//! Resolves the trunk: the current revision and all of its ancestors.
//!
//! The trunk is drawn as one straight line in lane 0. Without a current
//! revision (or with an id that matches nothing) the trunk is empty and the
//! allocator falls back to treating the oldest root as the main line.

use std::collections::HashSet;

use crate::core::graph::AncestryIndex;
use crate::core::types::{Revision, RevisionId};

/// The ancestry chain of the current revision.
#[derive(Debug, Default)]
pub struct Trunk<'a> {
    /// Root first, current revision last
    chain: Vec<&'a Revision>,
    ids: HashSet<&'a RevisionId>,
}

impl<'a> Trunk<'a> {
    /// Check whether a trunk was resolved.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn contains(&self, id: &RevisionId) -> bool {
        self.ids.contains(id)
    }

    /// The oldest trunk revision. Its parent is absent or missing.
    pub fn root(&self) -> Option<&'a Revision> {
        self.chain.first().copied()
    }

    /// The current revision.
    pub fn tip(&self) -> Option<&'a Revision> {
        self.chain.last().copied()
    }

    /// Trunk revisions, root first.
    pub fn chain(&self) -> &[&'a Revision] {
        &self.chain
    }

    /// Trunk ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &'a RevisionId> + '_ {
        self.ids.iter().copied()
    }
}

/// Walk from `current` back to its root.
///
/// The walk ends at the first revision whose parent is null or missing; that
/// revision is included. A dangling root is still a valid trunk root. The
/// walk also ends if it would revisit a revision.
///
/// # Example
///
/// ```
/// use revlane::core::graph::AncestryIndex;
/// use revlane::core::types::{Revision, RevisionId};
/// use revlane::layout::trunk::resolve_trunk;
///
/// let revisions = vec![
///     Revision::root("root", "1").unwrap(),
///     Revision::child("a", "root", "2").unwrap(),
///     Revision::child("side", "root", "3").unwrap(),
/// ];
/// let index = AncestryIndex::build(&revisions);
///
/// let current = RevisionId::new("a").unwrap();
/// let trunk = resolve_trunk(&index, Some(&current));
/// assert_eq!(trunk.len(), 2);
/// assert!(!trunk.contains(&RevisionId::new("side").unwrap()));
///
/// assert!(resolve_trunk(&index, None).is_empty());
/// ```
pub fn resolve_trunk<'a>(index: &AncestryIndex<'a>, current: Option<&RevisionId>) -> Trunk<'a> {
    let Some(start) = current.and_then(|id| index.get(id)) else {
        if let Some(id) = current {
            tracing::debug!(current = %id, "current revision not found, using fallback trunk");
        }
        return Trunk::default();
    };

    let mut chain = vec![start];
    let mut ids = HashSet::from([start.id()]);

    let mut cursor = index.parent(start.id());
    while let Some(parent) = cursor {
        if !ids.insert(parent.id()) {
            break;
        }
        chain.push(parent);
        cursor = index.parent(parent.id());
    }
    chain.reverse();

    tracing::trace!(len = chain.len(), "resolved trunk");
    Trunk { chain, ids }
}
