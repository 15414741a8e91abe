//! Contract tests for the layout engine.
//!
//! Each test pins one documented behavior of `build_revision_tree_layout`
//! through the public library API.

use revlane::core::types::{Revision, RevisionId, SortOrder};
use revlane::{build_revision_tree_layout, get_missing_parent_markers, RevisionTreeLayout};

// =============================================================================
// Helpers
// =============================================================================

fn root(id: &str, ts: &str) -> Revision {
    Revision::root(id, ts).unwrap()
}

fn child(id: &str, parent: &str, ts: &str) -> Revision {
    Revision::child(id, parent, ts).unwrap()
}

fn rid(id: &str) -> RevisionId {
    RevisionId::new(id).unwrap()
}

fn lane(layout: &RevisionTreeLayout, id: &str) -> usize {
    layout
        .lane_of(&rid(id))
        .unwrap_or_else(|| panic!("no node for {}", id))
}

fn ids(layout: &RevisionTreeLayout) -> Vec<&str> {
    layout.nodes.iter().map(|n| n.id().as_str()).collect()
}

// =============================================================================
// Basic shapes
// =============================================================================

#[test]
fn linear_chain_uses_one_lane() {
    let revisions = vec![
        root("r1", "2024-01-01T00:00:00Z"),
        child("r2", "r1", "2024-01-02T00:00:00Z"),
        child("r3", "r2", "2024-01-03T00:00:00Z"),
        child("r4", "r3", "2024-01-04T00:00:00Z"),
    ];

    let layout = build_revision_tree_layout(&revisions, SortOrder::Desc, Some(&rid("r4")));

    assert_eq!(layout.lane_count, 1);
    assert!(layout.nodes.iter().all(|n| n.lane == 0));
    assert!(layout.missing_parent_ids.is_empty());
}

#[test]
fn second_child_branches_out() {
    let revisions = vec![
        root("root", "2024-01-01T00:00:00Z"),
        child("a", "root", "2024-01-02T00:00:00Z"),
        child("b", "root", "2024-01-03T00:00:00Z"),
    ];

    let layout = build_revision_tree_layout(&revisions, SortOrder::Asc, None);

    assert_eq!(lane(&layout, "root"), 0);
    assert_eq!(lane(&layout, "a"), 0);
    assert_eq!(lane(&layout, "b"), 1);
    assert_eq!(layout.lane_count, 2);
}

#[test]
fn empty_history() {
    let layout = build_revision_tree_layout(&[], SortOrder::Desc, None);

    assert!(layout.is_empty());
    assert_eq!(layout.lane_count, 1);
    assert!(layout.trunk_ids.is_empty());
    assert!(layout.missing_parent_ids.is_empty());
    assert!(layout.missing_parent_markers().is_empty());
}

// =============================================================================
// Trunk
// =============================================================================

#[test]
fn trunk_stays_in_lane_zero() {
    // root -> A -> B -> C, with a side branch A -> X -> Y that is older
    // than B, so without a trunk X would continue A.
    let revisions = vec![
        root("root", "2024-01-01T00:00:00Z"),
        child("A", "root", "2024-01-02T00:00:00Z"),
        child("X", "A", "2024-01-03T00:00:00Z"),
        child("B", "A", "2024-01-04T00:00:00Z"),
        child("Y", "X", "2024-01-05T00:00:00Z"),
        child("C", "B", "2024-01-06T00:00:00Z"),
    ];

    let layout = build_revision_tree_layout(&revisions, SortOrder::Desc, Some(&rid("C")));

    for id in ["root", "A", "B", "C"] {
        assert!(layout.trunk_ids.contains(&rid(id)), "{} on trunk", id);
        assert_eq!(lane(&layout, id), 0, "{} in lane 0", id);
    }
    assert_eq!(layout.trunk_ids.len(), 4);
    assert!(lane(&layout, "X") > 0);
    assert!(lane(&layout, "Y") > 0);
    assert_eq!(lane(&layout, "X"), lane(&layout, "Y"));
}

#[test]
fn later_fork_sits_nearer_the_trunk() {
    let revisions = vec![
        root("root", "2024-01-01T00:00:00Z"),
        child("A", "root", "2024-01-02T00:00:00Z"),
        child("B", "A", "2024-01-03T00:00:00Z"),
        child("E1", "A", "2024-01-04T00:00:00Z"),
        child("C", "B", "2024-01-05T00:00:00Z"),
        child("E2", "E1", "2024-01-06T00:00:00Z"),
        child("D", "C", "2024-01-07T00:00:00Z"),
        child("L1", "C", "2024-01-08T00:00:00Z"),
    ];

    let layout = build_revision_tree_layout(&revisions, SortOrder::Desc, Some(&rid("D")));

    assert!(lane(&layout, "L1") < lane(&layout, "E1"));
    assert_eq!(lane(&layout, "E1"), lane(&layout, "E2"));
    assert_eq!(lane(&layout, "L1"), 1);
    assert_eq!(layout.lane_count, 3);
}

#[test]
fn trunk_through_first_root_keeps_other_roots_outward() {
    let revisions = vec![
        root("main", "2024-01-01T00:00:00Z"),
        root("other", "2024-01-02T00:00:00Z"),
        child("main-2", "main", "2024-01-03T00:00:00Z"),
        child("other-2", "other", "2024-01-04T00:00:00Z"),
    ];

    let layout = build_revision_tree_layout(&revisions, SortOrder::Desc, Some(&rid("main-2")));

    assert_eq!(lane(&layout, "main"), 0);
    assert_eq!(lane(&layout, "main-2"), 0);
    assert!(lane(&layout, "other") > 0);
    assert_eq!(lane(&layout, "other"), lane(&layout, "other-2"));
}

#[test]
fn trunk_through_younger_root_takes_lane_zero() {
    let revisions = vec![
        root("old", "2024-01-01T00:00:00Z"),
        root("new", "2024-01-02T00:00:00Z"),
        child("new-2", "new", "2024-01-03T00:00:00Z"),
    ];

    let layout = build_revision_tree_layout(&revisions, SortOrder::Desc, Some(&rid("new-2")));

    assert_eq!(lane(&layout, "new"), 0);
    assert_eq!(lane(&layout, "new-2"), 0);
    assert_eq!(lane(&layout, "old"), 1);
}

#[test]
fn unknown_current_degrades_to_fallback() {
    let revisions = vec![
        root("root", "2024-01-01T00:00:00Z"),
        child("a", "root", "2024-01-02T00:00:00Z"),
        child("b", "root", "2024-01-03T00:00:00Z"),
    ];

    let with_unknown =
        build_revision_tree_layout(&revisions, SortOrder::Asc, Some(&rid("does-not-exist")));
    let without = build_revision_tree_layout(&revisions, SortOrder::Asc, None);

    assert!(with_unknown.trunk_ids.is_empty());
    assert_eq!(with_unknown, without);
}

#[test]
fn fallback_first_child_inherits() {
    let revisions = vec![
        root("root", "2024-01-01T00:00:00Z"),
        child("first", "root", "2024-01-02T00:00:00Z"),
        child("second", "root", "2024-01-03T00:00:00Z"),
    ];

    let layout = build_revision_tree_layout(&revisions, SortOrder::Desc, None);

    assert!(layout.trunk_ids.is_empty());
    assert_eq!(lane(&layout, "root"), 0);
    assert_eq!(lane(&layout, "first"), 0);
    assert_eq!(lane(&layout, "second"), 1);
}

// =============================================================================
// Missing parents
// =============================================================================

#[test]
fn missing_parents_produce_markers() {
    let revisions = vec![
        child("orphan-a", "missing-parent", "2024-01-01T00:00:00Z"),
        child("orphan-b", "missing-parent", "2024-01-02T00:00:00Z"),
        child("orphan-c", "missing-other", "2024-01-03T00:00:00Z"),
    ];

    let layout = build_revision_tree_layout(&revisions, SortOrder::Asc, None);

    assert!(layout.nodes.iter().all(|n| n.is_missing_parent));
    assert_eq!(
        layout.missing_parent_ids.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        vec!["missing-other", "missing-parent"]
    );

    let keys: Vec<String> = layout
        .missing_parent_markers()
        .iter()
        .map(|m| m.key())
        .collect();
    assert_eq!(
        keys,
        vec!["missing-parent-0", "missing-parent-1", "missing-other-2"]
    );
}

#[test]
fn trunk_may_start_at_a_dangling_root() {
    let revisions = vec![
        child("a", "gone", "2024-01-01T00:00:00Z"),
        child("b", "a", "2024-01-02T00:00:00Z"),
        root("unrelated", "2024-01-03T00:00:00Z"),
    ];

    let layout = build_revision_tree_layout(&revisions, SortOrder::Desc, Some(&rid("b")));

    assert_eq!(layout.trunk_ids.len(), 2);
    assert_eq!(lane(&layout, "a"), 0);
    assert_eq!(lane(&layout, "b"), 0);
    assert_eq!(lane(&layout, "unrelated"), 1);

    let markers = layout.missing_parent_markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].parent_id.as_str(), "gone");
    assert_eq!(markers[0].lane, 0);
}

#[test]
fn markers_follow_supplied_node_order() {
    let revisions = vec![
        child("x", "p", "2024-01-01T00:00:00Z"),
        child("y", "q", "2024-01-02T00:00:00Z"),
    ];

    let asc = build_revision_tree_layout(&revisions, SortOrder::Asc, None);
    let desc = build_revision_tree_layout(&revisions, SortOrder::Desc, None);

    let asc_keys: Vec<String> = get_missing_parent_markers(&asc.nodes)
        .iter()
        .map(|m| m.key())
        .collect();
    let desc_keys: Vec<String> = get_missing_parent_markers(&desc.nodes)
        .iter()
        .map(|m| m.key())
        .collect();

    assert_eq!(asc_keys, vec!["p-0", "q-1"]);
    assert_eq!(desc_keys, vec!["q-1", "p-0"]);
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn asc_and_desc_share_lanes() {
    let revisions = vec![
        root("root", "2024-01-01T00:00:00Z"),
        child("a", "root", "2024-01-02T00:00:00Z"),
        child("b", "root", "2024-01-03T00:00:00Z"),
        child("c", "a", "2024-01-04T00:00:00Z"),
        child("d", "b", "2024-01-05T00:00:00Z"),
    ];

    let asc = build_revision_tree_layout(&revisions, SortOrder::Asc, Some(&rid("c")));
    let desc = build_revision_tree_layout(&revisions, SortOrder::Desc, Some(&rid("c")));

    let mut reversed = ids(&desc);
    reversed.reverse();
    assert_eq!(ids(&asc), reversed);
    assert_eq!(ids(&asc), vec!["root", "a", "b", "c", "d"]);

    for node in &asc.nodes {
        assert_eq!(desc.lane_of(node.id()), Some(node.lane));
    }
    assert_eq!(asc.lane_count, desc.lane_count);
}

#[test]
fn input_order_does_not_matter() {
    let forward = vec![
        root("root", "2024-01-01T00:00:00Z"),
        child("a", "root", "2024-01-02T00:00:00Z"),
        child("b", "root", "2024-01-03T00:00:00Z"),
    ];
    let mut shuffled = forward.clone();
    shuffled.reverse();

    let one = build_revision_tree_layout(&forward, SortOrder::Desc, None);
    let two = build_revision_tree_layout(&shuffled, SortOrder::Desc, None);

    assert_eq!(one, two);
}

#[test]
fn equal_timestamps_keep_input_order() {
    let revisions = vec![
        root("root", "2024-01-01T00:00:00Z"),
        child("first", "root", "2024-01-02T00:00:00Z"),
        child("second", "root", "2024-01-02T00:00:00Z"),
    ];

    let layout = build_revision_tree_layout(&revisions, SortOrder::Asc, None);

    assert_eq!(ids(&layout), vec!["root", "first", "second"]);
    assert_eq!(lane(&layout, "first"), 0);
    assert_eq!(lane(&layout, "second"), 1);
}

// =============================================================================
// Malformed input
// =============================================================================

#[test]
fn duplicate_ids_do_not_panic() {
    let revisions = vec![
        root("dup", "2024-01-01T00:00:00Z"),
        root("dup", "2024-01-02T00:00:00Z"),
        child("kid", "dup", "2024-01-03T00:00:00Z"),
    ];

    let layout = build_revision_tree_layout(&revisions, SortOrder::Desc, Some(&rid("kid")));

    assert_eq!(layout.nodes.len(), 3);
    assert!(layout.nodes.iter().all(|n| n.lane < layout.lane_count));
}

#[test]
fn cycles_terminate() {
    let revisions = vec![
        child("a", "b", "2024-01-01T00:00:00Z"),
        child("b", "a", "2024-01-02T00:00:00Z"),
    ];

    let layout = build_revision_tree_layout(&revisions, SortOrder::Desc, Some(&rid("a")));

    assert_eq!(layout.nodes.len(), 2);
    assert!(layout.nodes.iter().all(|n| n.lane < layout.lane_count));
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn layout_serializes_camel_case() {
    let revisions = vec![
        child("a", "gone", "2024-01-01T00:00:00Z").with_author("alice"),
    ];

    let layout = build_revision_tree_layout(&revisions, SortOrder::Desc, Some(&rid("a")));
    let json = serde_json::to_value(&layout).unwrap();

    assert_eq!(json["laneCount"], 1);
    assert_eq!(json["trunkIds"][0], "a");
    assert_eq!(json["missingParentIds"][0], "gone");
    assert_eq!(json["nodes"][0]["id"], "a");
    assert_eq!(json["nodes"][0]["parentId"], "gone");
    assert_eq!(json["nodes"][0]["author"], "alice");
    assert_eq!(json["nodes"][0]["lane"], 0);
    assert_eq!(json["nodes"][0]["isMissingParent"], true);
}
