//! tmux operation rendering (dry run)
//!
//! Translates planned windows into the tmux commands that would build them:
//! `new-session`/`new-window` for the window's first pane, one `split-window`
//! per split node in pre-order, then `send-keys` for pane commands: each line
//! is typed with `-l` and submitted with a separate `Enter`. Working
//! directories are typed into the pane as `cd` after the pane exists.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::layout::{WindowPlan, WorkspacePlan};
use crate::config::Settings;
use crate::domain::{expand_env_vars, NodeId, SplitDirection, SplitNode};

/// Logical pane handle; bound to a tmux pane id when the plan runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaneHandle(pub usize);

impl fmt::Display for PaneHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// One word of a tmux command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Word {
    Literal(String),
    Pane(PaneHandle),
}

impl Word {
    fn lit(s: impl Into<String>) -> Self {
        Word::Literal(s.into())
    }
}

/// A single tmux operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TmuxOp {
    NewSession {
        session: String,
        window: String,
        pane: PaneHandle,
    },
    NewWindow {
        session: String,
        window: String,
        pane: PaneHandle,
    },
    SplitWindow {
        target: PaneHandle,
        direction: SplitDirection,
        /// Share of the new pane
        percent: u8,
        pane: PaneHandle,
    },
    /// Text typed literally (`send-keys -l`), never read as key names
    SendKeys {
        target: PaneHandle,
        keys: String,
    },
    /// Submits the typed line
    SendEnter {
        target: PaneHandle,
    },
}

impl TmuxOp {
    /// Pane created by this operation.
    pub fn creates(&self) -> Option<PaneHandle> {
        match self {
            TmuxOp::NewSession { pane, .. }
            | TmuxOp::NewWindow { pane, .. }
            | TmuxOp::SplitWindow { pane, .. } => Some(*pane),
            TmuxOp::SendKeys { .. } | TmuxOp::SendEnter { .. } => None,
        }
    }

    /// tmux arguments, without the binary.
    pub fn words(&self) -> Vec<Word> {
        match self {
            TmuxOp::NewSession {
                session, window, ..
            } => vec![
                Word::lit("new-session"),
                Word::lit("-d"),
                Word::lit("-s"),
                Word::lit(session),
                Word::lit("-n"),
                Word::lit(window),
            ],
            TmuxOp::NewWindow {
                session, window, ..
            } => vec![
                Word::lit("new-window"),
                Word::lit("-t"),
                Word::lit(format!("{}:", session)),
                Word::lit("-n"),
                Word::lit(window),
            ],
            TmuxOp::SplitWindow {
                target,
                direction,
                percent,
                ..
            } => vec![
                Word::lit("split-window"),
                Word::lit("-t"),
                Word::Pane(*target),
                Word::lit(match direction {
                    SplitDirection::Vertical => "-h",
                    SplitDirection::Horizontal => "-v",
                }),
                Word::lit("-l"),
                Word::lit(format!("{}%", percent)),
            ],
            TmuxOp::SendKeys { target, keys } => vec![
                Word::lit("send-keys"),
                Word::lit("-t"),
                Word::Pane(*target),
                Word::lit("-l"),
                Word::lit(keys),
            ],
            TmuxOp::SendEnter { target } => vec![
                Word::lit("send-keys"),
                Word::lit("-t"),
                Word::Pane(*target),
                Word::lit("Enter"),
            ],
        }
    }
}

/// Build the operations for every planned window, sessions in order.
pub fn operations(plan: &WorkspacePlan) -> Vec<TmuxOp> {
    let mut ops = Vec::new();
    let mut next = 0;
    for session in &plan.sessions {
        for (idx, window) in session.windows.iter().enumerate() {
            ops.extend(window_operations(window, idx == 0, &mut next));
        }
    }
    ops
}

/// Operations for one window. All splits come first (pre-order, so a pane
/// exists before it is split), then the commands of each leaf in order.
pub fn window_operations(plan: &WindowPlan, opens_session: bool, next: &mut usize) -> Vec<TmuxOp> {
    let mut alloc = || {
        let handle = PaneHandle(*next);
        *next += 1;
        handle
    };

    let root = alloc();
    let mut ops = vec![if opens_session {
        TmuxOp::NewSession {
            session: plan.session.clone(),
            window: plan.window.clone(),
            pane: root,
        }
    } else {
        TmuxOp::NewWindow {
            session: plan.session.clone(),
            window: plan.window.clone(),
            pane: root,
        }
    }];

    let mut handles: HashMap<NodeId, PaneHandle> = HashMap::new();
    handles.insert(plan.graph.root_id(), root);

    for visit in plan.graph.iter() {
        let Some(&target) = handles.get(&visit.id) else {
            continue;
        };
        if let SplitNode::Split { direction, first, second, .. } = visit.node {
            let pane = alloc();
            ops.push(TmuxOp::SplitWindow {
                target,
                direction: *direction,
                percent: visit.node.new_pane_percent().unwrap_or(50),
                pane,
            });
            handles.insert(*first, target);
            handles.insert(*second, pane);
        }
    }

    for binding in &plan.bindings {
        let Some(&target) = handles.get(&binding.node) else {
            continue;
        };
        for command in &binding.commands {
            if let Some(dir) = command.workdir.as_deref().filter(|d| !d.trim().is_empty()) {
                ops.push(TmuxOp::SendKeys {
                    target,
                    keys: format!("cd {}", shell_quote(&expand_env_vars(dir.trim()))),
                });
                ops.push(TmuxOp::SendEnter { target });
            }
            for line in command.lines() {
                ops.push(TmuxOp::SendKeys {
                    target,
                    keys: line.to_string(),
                });
                ops.push(TmuxOp::SendEnter { target });
            }
        }
    }
    ops
}

/// Quote `s` for a POSIX shell; safe words are left bare.
pub fn shell_quote(s: &str) -> String {
    let safe = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:%@=+,".contains(c));
    if safe {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

/// Renders tmux operations as a shell script or a readable listing.
pub struct TmuxRenderer {
    settings: Arc<Settings>,
}

impl TmuxRenderer {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    /// POSIX shell script; created pane ids are captured into `$pN` variables.
    #[instrument(level = "debug", skip_all, fields(ops = ops.len()))]
    pub fn render_script(&self, ops: &[TmuxOp]) -> String {
        let tmux = shell_quote(&self.settings.tmux_bin);
        let mut lines = vec![
            format!("#!{}", self.settings.shell),
            "# generated by gridmux".to_string(),
            "set -e".to_string(),
        ];
        for op in ops {
            let args = op
                .words()
                .iter()
                .map(|word| match word {
                    Word::Literal(s) => shell_quote(s),
                    Word::Pane(handle) => format!("\"${}\"", handle),
                })
                .join(" ");
            lines.push(match op.creates() {
                Some(pane) => format!("{}=$({} {} -P -F '#{{pane_id}}')", pane, tmux, args),
                None => format!("{} {}", tmux, args),
            });
        }
        debug!("render_script: {} lines", lines.len());
        lines.join("\n") + "\n"
    }

    /// One operation per line, pane handles shown as `pN`.
    pub fn render_listing(&self, ops: &[TmuxOp]) -> String {
        ops.iter()
            .map(|op| {
                let args = op
                    .words()
                    .iter()
                    .map(|word| match word {
                        Word::Literal(s) => shell_quote(s),
                        Word::Pane(handle) => handle.to_string(),
                    })
                    .join(" ");
                match op.creates() {
                    Some(pane) => format!("{} {}  -> {}", self.settings.tmux_bin, args, pane),
                    None => format!("{} {}", self.settings.tmux_bin, args),
                }
            })
            .join("\n")
    }
}
