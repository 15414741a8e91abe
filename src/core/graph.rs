//! core::graph
//!
//! Ancestry index over a flat revision list.
//!
//! # Architecture
//!
//! The history is a forest of out-trees where:
//! - Nodes are revisions
//! - Edges point from child to parent (stored as a parent pointer on the revision)
//! - Roots have no parent, or a parent outside the supplied set
//!
//! A parent id that is referenced but not supplied is a *missing parent*.
//! This is a normal condition (pagination boundaries, truncated history),
//! not an error.
//!
//! # Invariants
//!
//! - At most one parent per revision
//! - Children lists preserve input order until the caller re-sorts them

use super::types::{Revision, RevisionId};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Lookup tables derived from a revision list.
///
/// Borrowed from the caller's slice; building an index never copies
/// revisions.
#[derive(Debug, Default)]
pub struct AncestryIndex<'a> {
    /// Revision for each id (first occurrence wins on duplicates)
    by_id: HashMap<&'a RevisionId, &'a Revision>,
    /// Children of each parent id, real or missing
    children_of: HashMap<&'a RevisionId, Vec<&'a Revision>>,
    /// Parent ids referenced but not supplied
    missing_parent_ids: BTreeSet<RevisionId>,
}

impl<'a> AncestryIndex<'a> {
    /// Build the index in one pass over `revisions`.
    ///
    /// # Example
    ///
    /// ```
    /// use revlane::core::graph::AncestryIndex;
    /// use revlane::core::types::Revision;
    ///
    /// let revisions = vec![
    ///     Revision::root("a", "2024-01-01T00:00:00Z").unwrap(),
    ///     Revision::child("b", "a", "2024-01-02T00:00:00Z").unwrap(),
    ///     Revision::child("c", "gone", "2024-01-03T00:00:00Z").unwrap(),
    /// ];
    ///
    /// let index = AncestryIndex::build(&revisions);
    /// assert_eq!(index.len(), 3);
    /// assert!(index.missing_parent_ids().iter().any(|id| id.as_str() == "gone"));
    /// ```
    pub fn build(revisions: &'a [Revision]) -> Self {
        let mut by_id = HashMap::with_capacity(revisions.len());
        let mut children_of: HashMap<&'a RevisionId, Vec<&'a Revision>> = HashMap::new();

        for revision in revisions {
            by_id.entry(revision.id()).or_insert(revision);
            if let Some(parent) = revision.parent_id() {
                children_of.entry(parent).or_default().push(revision);
            }
        }

        let missing_parent_ids = revisions
            .iter()
            .filter_map(Revision::parent_id)
            .filter(|parent| !by_id.contains_key(parent))
            .cloned()
            .collect();

        Self {
            by_id,
            children_of,
            missing_parent_ids,
        }
    }

    /// Number of distinct revision ids.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Look up a revision by id.
    pub fn get(&self, id: &RevisionId) -> Option<&'a Revision> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &RevisionId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Get the parent revision, if it was supplied.
    pub fn parent(&self, id: &RevisionId) -> Option<&'a Revision> {
        self.get(id)
            .and_then(Revision::parent_id)
            .and_then(|parent| self.get(parent))
    }

    /// Get the children of a parent id, real or missing.
    pub fn children(&self, id: &RevisionId) -> &[&'a Revision] {
        self.children_of.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Mutable access to the children lists, for re-sorting.
    pub(crate) fn children_mut(
        &mut self,
    ) -> impl Iterator<Item = &mut Vec<&'a Revision>> + '_ {
        self.children_of.values_mut()
    }

    /// Parent ids referenced but not supplied.
    pub fn missing_parent_ids(&self) -> &BTreeSet<RevisionId> {
        &self.missing_parent_ids
    }

    /// Check whether a revision points at a parent outside the set.
    pub fn is_missing_parent(&self, revision: &Revision) -> bool {
        revision
            .parent_id()
            .is_some_and(|parent| !self.by_id.contains_key(parent))
    }

    /// Check whether a revision starts a tree: no parent, or a missing one.
    pub fn is_root(&self, revision: &Revision) -> bool {
        match revision.parent_id() {
            None => true,
            Some(parent) => !self.by_id.contains_key(parent),
        }
    }

    /// Get all ancestors of a revision (parent, grandparent, etc.).
    ///
    /// Returns ancestors in order from immediate parent to root. The walk
    /// stops at a missing parent and never visits a revision twice.
    ///
    /// # Example
    ///
    /// ```
    /// use revlane::core::graph::AncestryIndex;
    /// use revlane::core::types::{Revision, RevisionId};
    ///
    /// let revisions = vec![
    ///     Revision::root("a", "2024-01-01T00:00:00Z").unwrap(),
    ///     Revision::child("b", "a", "2024-01-02T00:00:00Z").unwrap(),
    ///     Revision::child("c", "b", "2024-01-03T00:00:00Z").unwrap(),
    /// ];
    /// let index = AncestryIndex::build(&revisions);
    ///
    /// let c = RevisionId::new("c").unwrap();
    /// let ids: Vec<_> = index.ancestors(&c).iter().map(|r| r.id().as_str()).collect();
    /// assert_eq!(ids, vec!["b", "a"]);
    /// ```
    pub fn ancestors(&self, id: &RevisionId) -> Vec<&'a Revision> {
        let mut result = Vec::new();
        let mut seen: HashSet<&RevisionId> = HashSet::new();
        seen.insert(id);

        let mut current = self.parent(id);
        while let Some(parent) = current {
            if !seen.insert(parent.id()) {
                break;
            }
            result.push(parent);
            current = self.parent(parent.id());
        }

        result
    }

    /// Revisions that start a tree, in input order.
    pub fn roots(&self, revisions: &'a [Revision]) -> Vec<&'a Revision> {
        revisions.iter().filter(|r| self.is_root(r)).collect()
    }
}
