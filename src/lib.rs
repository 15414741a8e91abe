//! revlane - Lane layout for single-parent revision histories
//!
//! Given a version history where every revision has at most one parent,
//! revlane assigns each revision a lane (a visual column) for drawing a
//! git-log-style ancestry graph. The ancestry of a designated current
//! revision is kept as one straight trunk in lane 0, and side branches are
//! placed so that later forks sit closer to the trunk than earlier ones.
//!
//! # Architecture
//!
//! - [`core`] - Domain types, ancestry index, input parsing, configuration
//! - [`layout`] - The layout engine: trunk, ordering, lanes, markers
//! - [`cli`] - Command-line interface layer
//! - [`ui`] - Output formatting
//!
//! # Correctness Invariants
//!
//! 1. Every trunk revision is in lane 0
//! 2. Lanes do not depend on the display order
//! 3. Missing parents are reported, never treated as errors
//! 4. A layout is a pure function of its inputs

pub mod cli;
pub mod core;
pub mod layout;
pub mod ui;

pub use layout::{
    build_revision_tree_layout, get_missing_parent_markers, LaidOutNode, MissingParentMarker,
    RevisionTreeLayout,
};
