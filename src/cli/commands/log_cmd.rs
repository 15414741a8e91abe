//! log command - List revisions indented by lane
//!
//! One line per revision in display order. The glyph marks the revision's
//! role: `@` current, `*` trunk, `o` anything else.

use anyhow::Result;

use super::LayoutRun;
use crate::cli::args::LayoutArgs;
use crate::cli::Context;
use crate::layout::{LaidOutNode, RevisionTreeLayout};
use crate::ui::output;

/// Role of a revision in the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Current,
    Trunk,
    Other,
}

impl RowKind {
    fn glyph(self) -> char {
        match self {
            RowKind::Current => '@',
            RowKind::Trunk => '*',
            RowKind::Other => 'o',
        }
    }

    fn of(node: &LaidOutNode, layout: &RevisionTreeLayout, run: &LayoutRun) -> Self {
        if run.current.as_ref() == Some(node.id()) && layout.trunk_ids.contains(node.id()) {
            RowKind::Current
        } else if layout.trunk_ids.contains(node.id()) {
            RowKind::Trunk
        } else {
            RowKind::Other
        }
    }
}

/// Format the time column: `YYYY-MM-DD HH:MM` for RFC 3339 input, the raw
/// string otherwise.
fn format_time(node: &LaidOutNode) -> String {
    let timestamp = node.revision.timestamp();
    match timestamp.parse_rfc3339() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => timestamp.to_string(),
    }
}

/// Format one listing row.
///
/// # Example
///
/// ```
/// use revlane::cli::commands::{format_row, RowKind};
/// use revlane::core::types::{Revision, SortOrder};
/// use revlane::layout::build_revision_tree_layout;
///
/// let revisions = vec![Revision::root("r1", "2024-03-01T10:00:00Z").unwrap().with_author("alice")];
/// let layout = build_revision_tree_layout(&revisions, SortOrder::Desc, None);
///
/// let row = format_row(&layout.nodes[0], RowKind::Other, 2, false);
/// assert_eq!(row, "o r1  2024-03-01 10:00  alice");
/// ```
pub fn format_row(node: &LaidOutNode, kind: RowKind, indent: usize, short: bool) -> String {
    let mut row = format!(
        "{}{} {}",
        " ".repeat(node.lane * indent),
        kind.glyph(),
        node.id()
    );
    if short {
        return row;
    }

    row.push_str("  ");
    row.push_str(&format_time(node));
    for field in [&node.revision.author, &node.revision.status]
        .into_iter()
        .flatten()
    {
        row.push_str("  ");
        row.push_str(field);
    }
    if node.is_missing_parent {
        if let Some(parent) = node.parent_id() {
            row.push_str(&format!("  (missing parent {})", parent));
        }
    }
    row
}

/// List revisions indented by lane.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `args` - Input file, order, and current revision
/// * `short` - Short format (ids only); also enabled by `log.short` config
pub fn log(ctx: &Context, args: &LayoutArgs, short: bool) -> Result<()> {
    let run = LayoutRun::prepare(ctx, args)?;
    let layout = run.layout();

    if layout.is_empty() {
        output::print("No revisions.", ctx.verbosity());
        return Ok(());
    }

    if let Some(current) = &run.current {
        if layout.trunk_ids.is_empty() {
            output::warn(
                format!("current revision '{}' not found; no trunk drawn", current),
                ctx.verbosity(),
            );
        }
    }

    let short = short || run.config.log_short();
    let indent = run.config.log_indent();

    for node in &layout.nodes {
        let kind = RowKind::of(node, &layout, &run);
        output::result(format_row(node, kind, indent, short));
    }

    if !short {
        output::print(
            format!(
                "\n({}, {})",
                output::count(layout.nodes.len(), "revision", "revisions"),
                output::count(layout.lane_count, "lane", "lanes")
            ),
            ctx.verbosity(),
        );
    }

    Ok(())
}
