//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};

/// Declarative tmux layouts: turn an ASCII grid into pane splits and commands
#[derive(Parser, Debug)]
#[command(name = "gridmux")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Project directory (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate every window of the workspace
    Check {
        /// Workspace file (default: from settings)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Show the pane tree of each window
    Plan {
        /// Workspace file (default: from settings)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Only show this window
        #[arg(short, long)]
        window: Option<String>,
    },

    /// Plan a single grid read from a file or stdin
    Grid {
        /// Grid file (default: stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print the tmux commands that build the workspace (dry run)
    Script {
        /// Workspace file (default: from settings)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Abort on the first window that fails to plan
        #[arg(short, long)]
        exit_on_error: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = ScriptFormat::Shell)]
        format: ScriptFormat,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Rendering of `script` output.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    /// Executable POSIX shell script
    Shell,
    /// One tmux command per line, panes shown as pN
    Text,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
