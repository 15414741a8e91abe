//! layout and markers commands - Emit the computed layout

use anyhow::{Context as _, Result};
use serde::Serialize;

use super::LayoutRun;
use crate::cli::args::LayoutArgs;
use crate::cli::Context;
use crate::layout::{MissingParentMarker, RevisionTreeLayout};
use crate::ui::output;

/// Layout plus its markers, as written to stdout.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutDocument<'a> {
    #[serde(flatten)]
    layout: &'a RevisionTreeLayout,
    markers: Vec<MissingParentMarker>,
}

/// Print the layout as JSON.
pub fn layout(ctx: &Context, args: &LayoutArgs, pretty: bool) -> Result<()> {
    let run = LayoutRun::prepare(ctx, args)?;
    let layout = run.layout();

    let document = LayoutDocument {
        markers: layout.missing_parent_markers(),
        layout: &layout,
    };

    let json = if pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }
    .context("Failed to serialize layout")?;

    output::result(json);
    Ok(())
}

/// Print one `<parent_id>\t<lane>` line per missing-parent marker.
pub fn markers(ctx: &Context, args: &LayoutArgs) -> Result<()> {
    let run = LayoutRun::prepare(ctx, args)?;
    let markers = run.layout().missing_parent_markers();

    if markers.is_empty() {
        output::print("No missing parents.", ctx.verbosity());
        return Ok(());
    }

    for marker in &markers {
        output::result(format!("{}\t{}", marker.parent_id, marker.lane));
    }
    Ok(())
}
