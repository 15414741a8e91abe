//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration and revisions
//! 2. Calls the layout engine
//! 3. Formats and displays output

mod completion;
mod config_cmd;
mod layout_cmd;
mod log_cmd;

pub use completion::completion;
pub use layout_cmd::{layout, markers};
pub use log_cmd::{format_row, log, RowKind};

use anyhow::{Context as _, Result};

use super::args::{Command, ConfigAction, LayoutArgs};
use super::Context;
use crate::core::config::Config;
use crate::core::input::read_revisions;
use crate::core::types::{Revision, RevisionId, SortOrder};
use crate::layout::{build_revision_tree_layout, RevisionTreeLayout};
use crate::ui::output;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Layout { args, pretty } => layout_cmd::layout(ctx, &args, pretty),
        Command::Log { args, short } => log_cmd::log(ctx, &args, short),
        Command::Markers { args } => layout_cmd::markers(ctx, &args),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value } => config_cmd::set(ctx, &key, &value),
            ConfigAction::List => config_cmd::list(ctx),
            ConfigAction::Path => config_cmd::path(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Load configuration for the working directory, reporting warnings.
pub(crate) fn load_config(ctx: &Context) -> Result<Config> {
    let cwd = ctx.working_dir()?;
    let result = Config::load(Some(&cwd)).context("Failed to load config")?;
    for warning in &result.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            ctx.verbosity(),
        );
    }
    Ok(result.config)
}

/// Revisions and resolved options for a layout run.
pub(crate) struct LayoutRun {
    pub revisions: Vec<Revision>,
    pub order: SortOrder,
    pub current: Option<RevisionId>,
    pub config: Config,
}

impl LayoutRun {
    /// Read input and resolve flags against config.
    ///
    /// Flags win over config; config wins over defaults.
    pub fn prepare(ctx: &Context, args: &LayoutArgs) -> Result<Self> {
        let config = load_config(ctx)?;
        let cwd = ctx.working_dir()?;

        let file = args.file.as_ref().map(|f| {
            if f.as_os_str() == "-" || f.is_absolute() {
                f.clone()
            } else {
                cwd.join(f)
            }
        });
        let revisions = read_revisions(file.as_deref()).context("Failed to read revisions")?;

        let order = args.order.unwrap_or_else(|| config.order());
        let current = match args.current.as_deref().or(config.current()) {
            Some(id) => Some(RevisionId::new(id).context("Invalid current revision id")?),
            None => None,
        };

        output::debug(
            format!(
                "{} revisions, order {}, current {}",
                revisions.len(),
                order,
                current.as_ref().map_or("(none)", |c| c.as_str())
            ),
            ctx.verbosity(),
        );

        Ok(Self {
            revisions,
            order,
            current,
            config,
        })
    }

    pub fn layout(&self) -> RevisionTreeLayout {
        build_revision_tree_layout(&self.revisions, self.order, self.current.as_ref())
    }
}
