//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::SortOrder;

/// revlane - Lane layout for single-parent revision histories
#[derive(Parser, Debug)]
#[command(name = "revlane")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if revlane was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Where revisions come from and how to lay them out.
#[derive(Args, Debug, Clone, Default)]
pub struct LayoutArgs {
    /// Revisions JSON file (reads stdin when omitted or '-')
    pub file: Option<PathBuf>,

    /// Display order: asc (oldest first) or desc (newest first)
    #[arg(long, value_name = "ORDER")]
    pub order: Option<SortOrder>,

    /// Revision whose ancestry is drawn as the trunk
    #[arg(long, value_name = "REVISION_ID")]
    pub current: Option<String>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the lane layout and print it as JSON
    #[command(
        name = "layout",
        long_about = "Compute the lane layout of a revision history and print it as JSON.\n\n\
            Every revision gets a lane. The ancestry of the current revision stays in \
            lane 0; side branches are pushed outward, later forks closer to the trunk. \
            Parents referenced but not supplied are reported as missing, with one \
            marker per parent and lane.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Lay out a history file, newest first
    revlane layout history.json

    # Keep the ancestry of a specific revision straight
    revlane layout history.json --current rev-104

    # Pipe a page from an API, oldest first, human-readable
    curl -s $API/revisions | revlane layout --order asc --pretty"
    )]
    Layout {
        #[command(flatten)]
        args: LayoutArgs,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// List revisions indented by lane
    #[command(
        name = "log",
        long_about = "List revisions one per line, indented by their lane.\n\n\
            Trunk revisions are marked with an asterisk (*) and the current revision \
            with an at sign (@). Revisions whose parent is missing from the input are \
            flagged so truncated history is easy to spot.",
        after_help = "\
READING THE OUTPUT:
    @ rev-4  2024-03-04 10:00  alice        current revision (lane 0)
      o rev-x  2024-03-02 12:00  bob        side branch (lane 1)
    * rev-3  2024-03-03 10:00  alice        trunk
    * rev-1  2024-03-01 10:00  alice        trunk root

    Each lane is indented by log.indent spaces (default 2)."
    )]
    Log {
        #[command(flatten)]
        args: LayoutArgs,

        /// Short format (ids only)
        #[arg(short, long)]
        short: bool,
    },

    /// Print the missing-parent markers
    #[command(
        name = "markers",
        long_about = "Print one line per missing-parent marker: the absent parent id and \
            the lane its dangling connector belongs to."
    )]
    Markers {
        #[command(flatten)]
        args: LayoutArgs,
    },

    /// Get and set configuration values
    #[command(
        name = "config",
        long_about = "Inspect and edit revlane configuration.\n\n\
            Global config lives in ~/.revlane/config.toml (or $REVLANE_CONFIG, or \
            $XDG_CONFIG_HOME/revlane/config.toml). Project config lives in .revlane.toml \
            in the working directory and overrides global values.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Show effective values
    revlane config list

    # Always list oldest first in this project
    revlane config set layout.order asc"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    revlane completion bash >> ~/.bashrc

    # Fish
    revlane completion fish > ~/.config/fish/completions/revlane.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a value in the project config
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
    /// Show which config files were loaded
    Path,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
