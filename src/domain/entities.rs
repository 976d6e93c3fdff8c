//! Domain entities: workspace description as written by the user.
//!
//! A workspace lists tmux sessions; each session holds windows; each window
//! carries a grid and the commands to run in its panes.

use serde::{Deserialize, Serialize};

/// Top-level workspace document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workspace {
    pub sessions: Vec<SessionSpec>,
}

/// One tmux session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSpec {
    pub name: String,
    pub windows: Vec<WindowSpec>,
}

/// One tmux window laid out from a grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSpec {
    pub name: String,
    pub grid: String,
    pub commands: Vec<PaneCommand>,
}

/// Command fragment for the pane whose label equals `pane`.
///
/// `workdir` is applied by typing a `cd` into the pane after it exists,
/// not by passing it at pane creation: tmux refuses to create a pane in a
/// directory that does not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaneCommand {
    pub pane: String,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workdir: Option<String>,
}

impl PaneCommand {
    /// Pane label this command targets, if `pane` is a single character.
    pub fn label(&self) -> Option<char> {
        let mut chars = self.pane.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(label), None) => Some(label),
            _ => None,
        }
    }

    /// Non-empty command lines, each sent to the pane separately.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.command.lines().map(str::trim_end).filter(|l| !l.trim().is_empty())
    }
}

/// Expand environment variables in a path string.
///
/// Supports:
/// - `$VAR` syntax
/// - `${VAR}` syntax
/// - `~` for home directory
///
/// Uses shellexpand crate for robust expansion.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
