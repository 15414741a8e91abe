//! layout::lanes
//!
//! Lane allocation.
//!
//! # Branches
//!
//! The history is split into branches: chains of revisions that share one
//! lane. A branch starts at a head and follows each revision's
//! *continuation child*:
//! - the child on the trunk, if the revision has one
//! - otherwise its oldest child
//!
//! Every other child starts a new branch that forks off outward. Children of
//! a missing parent have nothing to continue, so each one is a head of its
//! own, like a root.
//!
//! # Ordering
//!
//! Lanes are handed out depth-first from the primary branch (the trunk, or
//! the oldest root when there is no trunk). Once a branch has its lane, the
//! branches forking off it are allocated next, latest fork point first, each
//! immediately followed by its own forks. A fork close to the tip of a branch
//! therefore lands nearer to that branch than a fork made long before, and a
//! sub-branch always lands outward of the branch it leaves. Root trees other
//! than the primary follow, oldest root first.
//!
//! # Invariants
//!
//! - Trunk revisions are in lane 0
//! - A continuation child shares its parent's lane
//! - A forked branch's lane is greater than the lane it forks from

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::core::graph::AncestryIndex;
use crate::core::types::{Revision, RevisionId};

use super::trunk::Trunk;

/// Hands out lanes in increasing order.
///
/// One allocator lives for the duration of a single layout call.
#[derive(Debug, Default)]
struct LaneAllocator {
    next: usize,
}

impl LaneAllocator {
    fn allocate(&mut self) -> usize {
        let lane = self.next;
        self.next += 1;
        lane
    }
}

/// A branch waiting for its lane.
#[derive(Debug)]
struct Fork<'a> {
    /// Position of the revision the branch forks from
    fork_point: usize,
    /// Position of the branch head
    head_position: usize,
    head: &'a Revision,
}

/// Lane of every revision id.
#[derive(Debug, Default)]
pub struct LaneAssignment {
    lanes: HashMap<RevisionId, usize>,
}

impl LaneAssignment {
    /// Lane of a revision, if it was part of the input.
    pub fn lane_of(&self, id: &RevisionId) -> Option<usize> {
        self.lanes.get(id).copied()
    }

    /// `max(lane) + 1`, or 1 when nothing was assigned.
    pub fn lane_count(&self) -> usize {
        self.lanes.values().max().map_or(1, |max| max + 1)
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}

struct Allocation<'i, 'a> {
    index: &'i AncestryIndex<'a>,
    trunk: &'i Trunk<'a>,
    /// Processing position of each revision id
    positions: HashMap<&'a RevisionId, usize>,
    lanes: HashMap<&'a RevisionId, usize>,
    allocator: LaneAllocator,
}

impl<'i, 'a> Allocation<'i, 'a> {
    fn position(&self, revision: &Revision) -> usize {
        self.positions
            .get(revision.id())
            .copied()
            .unwrap_or(usize::MAX)
    }

    fn is_assigned(&self, revision: &Revision) -> bool {
        self.lanes.contains_key(revision.id())
    }

    /// The child that stays in `revision`'s lane.
    fn continuation(&self, revision: &Revision) -> Option<&'a Revision> {
        let children = self.index.children(revision.id());
        if !self.trunk.is_empty() {
            if let Some(on_trunk) = children.iter().find(|c| self.trunk.contains(c.id())) {
                return Some(*on_trunk);
            }
        }
        children.first().copied()
    }

    /// Allocate a lane for the tree headed by `head` and every branch that
    /// forks off it.
    fn allocate_tree(&mut self, head: &'a Revision) {
        let mut pending = vec![Fork {
            fork_point: 0,
            head_position: self.position(head),
            head,
        }];

        while let Some(fork) = pending.pop() {
            if self.is_assigned(fork.head) {
                continue;
            }
            let lane = self.allocator.allocate();
            let mut forks = self.follow_branch(fork.head, lane);

            // Latest fork point first; siblings off one revision oldest first.
            forks.sort_by_key(|f| (Reverse(f.fork_point), f.head_position));
            tracing::trace!(head = %fork.head.id(), lane, forks = forks.len(), "allocated branch");

            // Stack: push in reverse so the first fork is allocated next.
            pending.extend(forks.into_iter().rev());
        }
    }

    /// Assign `lane` along the branch starting at `head`; return the forks
    /// leaving it.
    fn follow_branch(&mut self, head: &'a Revision, lane: usize) -> Vec<Fork<'a>> {
        let mut forks = Vec::new();
        let mut cursor = Some(head);

        while let Some(revision) = cursor {
            if self.is_assigned(revision) {
                break;
            }
            let assigned = if self.trunk.contains(revision.id()) {
                0
            } else {
                lane
            };
            self.lanes.insert(revision.id(), assigned);

            let continuation = self.continuation(revision);
            let fork_point = self.position(revision);
            let index = self.index;
            for &child in index.children(revision.id()) {
                let continues = continuation.is_some_and(|c| std::ptr::eq(c, child));
                if !continues && !self.is_assigned(child) {
                    forks.push(Fork {
                        fork_point,
                        head_position: self.position(child),
                        head: child,
                    });
                }
            }

            cursor = continuation;
        }

        forks
    }
}

/// Assign a lane to every revision.
///
/// `processing` must hold the revisions oldest first (see
/// [`super::order::processing_order`]) and `index` must have its children
/// sorted the same way.
pub fn allocate_lanes<'a>(
    index: &AncestryIndex<'a>,
    trunk: &Trunk<'a>,
    processing: &[&'a Revision],
) -> LaneAssignment {
    let mut positions = HashMap::with_capacity(processing.len());
    for (position, revision) in processing.iter().enumerate() {
        positions.entry(revision.id()).or_insert(position);
    }

    let mut allocation = Allocation {
        index,
        trunk,
        positions,
        lanes: HashMap::with_capacity(processing.len()),
        allocator: LaneAllocator::default(),
    };

    let roots: Vec<&'a Revision> = processing
        .iter()
        .copied()
        .filter(|r| index.is_root(r))
        .collect();

    // The primary tree takes lane 0: the trunk's, or the oldest root's.
    let primary = trunk.root().or_else(|| roots.first().copied());
    if let Some(primary) = primary {
        allocation.allocate_tree(primary);
    }

    for &root in &roots {
        allocation.allocate_tree(root);
    }

    // Only revisions caught in a parent cycle are left at this point.
    for &revision in processing {
        allocation.allocate_tree(revision);
    }

    let assignment = LaneAssignment {
        lanes: allocation
            .lanes
            .into_iter()
            .map(|(id, lane)| (id.clone(), lane))
            .collect(),
    };

    tracing::debug!(
        revisions = processing.len(),
        trunk = trunk.len(),
        lanes = assignment.lane_count(),
        "allocated lanes"
    );

    assignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::order;
    use crate::layout::trunk::resolve_trunk;

    fn allocate(revisions: &[Revision], current: Option<&str>) -> LaneAssignment {
        let mut index = AncestryIndex::build(revisions);
        order::sort_children(&mut index);
        let current = current.map(|c| RevisionId::new(c).unwrap());
        let trunk = resolve_trunk(&index, current.as_ref());
        let processing = order::processing_order(revisions);
        allocate_lanes(&index, &trunk, &processing)
    }

    fn lane(assignment: &LaneAssignment, id: &str) -> usize {
        assignment.lane_of(&RevisionId::new(id).unwrap()).unwrap()
    }

    #[test]
    fn allocator_counts_up() {
        let mut allocator = LaneAllocator::default();
        assert_eq!(allocator.allocate(), 0);
        assert_eq!(allocator.allocate(), 1);
        assert_eq!(allocator.allocate(), 2);
    }

    #[test]
    fn empty_input() {
        let assignment = allocate(&[], None);
        assert!(assignment.is_empty());
        assert_eq!(assignment.lane_count(), 1);
    }

    #[test]
    fn oldest_child_continues_lane() {
        let revisions = vec![
            Revision::root("root", "1").unwrap(),
            Revision::child("second", "root", "3").unwrap(),
            Revision::child("first", "root", "2").unwrap(),
        ];
        let assignment = allocate(&revisions, None);
        assert_eq!(lane(&assignment, "root"), 0);
        assert_eq!(lane(&assignment, "first"), 0);
        assert_eq!(lane(&assignment, "second"), 1);
    }

    #[test]
    fn trunk_child_continues_lane_even_if_younger() {
        let revisions = vec![
            Revision::root("root", "1").unwrap(),
            Revision::child("side", "root", "2").unwrap(),
            Revision::child("main", "root", "3").unwrap(),
        ];
        let assignment = allocate(&revisions, Some("main"));
        assert_eq!(lane(&assignment, "main"), 0);
        assert_eq!(lane(&assignment, "side"), 1);
    }

    #[test]
    fn nested_forks_expand_outward() {
        // root -> a -> b (trunk)
        // a -> x -> x1
        //      x -> x2
        let revisions = vec![
            Revision::root("root", "1").unwrap(),
            Revision::child("a", "root", "2").unwrap(),
            Revision::child("x", "a", "3").unwrap(),
            Revision::child("x1", "x", "4").unwrap(),
            Revision::child("b", "a", "5").unwrap(),
            Revision::child("x2", "x", "6").unwrap(),
        ];
        let assignment = allocate(&revisions, Some("b"));
        assert_eq!(lane(&assignment, "x"), 1);
        assert_eq!(lane(&assignment, "x1"), 1);
        assert_eq!(lane(&assignment, "x2"), 2);
    }

    #[test]
    fn later_fork_nests_before_earlier_fork() {
        // Trunk root -> a -> b -> c; forks e (off a) and l (off c), and
        // l has its own sub-branch l2.
        let revisions = vec![
            Revision::root("root", "1").unwrap(),
            Revision::child("a", "root", "2").unwrap(),
            Revision::child("e", "a", "3").unwrap(),
            Revision::child("b", "a", "4").unwrap(),
            Revision::child("c", "b", "5").unwrap(),
            Revision::child("l", "c", "6").unwrap(),
            Revision::child("l1", "l", "7").unwrap(),
            Revision::child("l2", "l", "8").unwrap(),
            Revision::child("d", "c", "9").unwrap(),
        ];
        let assignment = allocate(&revisions, Some("d"));
        assert_eq!(lane(&assignment, "l"), 1);
        assert_eq!(lane(&assignment, "l1"), 1);
        assert_eq!(lane(&assignment, "l2"), 2);
        assert_eq!(lane(&assignment, "e"), 3);
        assert_eq!(assignment.lane_count(), 4);
    }

    #[test]
    fn siblings_off_one_revision_allocated_oldest_first() {
        let revisions = vec![
            Revision::root("root", "1").unwrap(),
            Revision::child("c1", "root", "2").unwrap(),
            Revision::child("c2", "root", "3").unwrap(),
            Revision::child("c3", "root", "4").unwrap(),
        ];
        let assignment = allocate(&revisions, None);
        assert_eq!(lane(&assignment, "c1"), 0);
        assert_eq!(lane(&assignment, "c2"), 1);
        assert_eq!(lane(&assignment, "c3"), 2);
    }

    #[test]
    fn children_of_missing_parent_never_inherit() {
        let revisions = vec![
            Revision::root("root", "1").unwrap(),
            Revision::child("o1", "gone", "2").unwrap(),
            Revision::child("o2", "gone", "3").unwrap(),
        ];
        let assignment = allocate(&revisions, None);
        assert_eq!(lane(&assignment, "root"), 0);
        assert_eq!(lane(&assignment, "o1"), 1);
        assert_eq!(lane(&assignment, "o2"), 2);
    }

    #[test]
    fn trunk_root_wins_lane_zero_over_older_root() {
        let revisions = vec![
            Revision::root("old", "1").unwrap(),
            Revision::root("new", "2").unwrap(),
            Revision::child("tip", "new", "3").unwrap(),
        ];
        let assignment = allocate(&revisions, Some("tip"));
        assert_eq!(lane(&assignment, "new"), 0);
        assert_eq!(lane(&assignment, "tip"), 0);
        assert_eq!(lane(&assignment, "old"), 1);
    }

    #[test]
    fn cycle_still_assigned() {
        let revisions = vec![
            Revision::root("root", "1").unwrap(),
            Revision::child("a", "b", "2").unwrap(),
            Revision::child("b", "a", "3").unwrap(),
        ];
        let assignment = allocate(&revisions, None);
        assert_eq!(assignment.len(), 3);
        assert_eq!(lane(&assignment, "root"), 0);
        assert_eq!(lane(&assignment, "a"), 1);
        assert_eq!(lane(&assignment, "b"), 1);
    }
}
