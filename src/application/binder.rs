//! Command binding: attach configured pane commands to the leaves of a plan.

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{NodeId, PaneCommand, PaneGraph};

/// Commands bound to one leaf pane, in workspace order.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneBinding {
    pub label: char,
    pub node: NodeId,
    pub commands: Vec<PaneCommand>,
}

impl PaneBinding {
    pub fn is_idle(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Bind `commands` to the leaves of `graph`.
///
/// Returns one binding per leaf in pre-order; leaves without commands get an
/// empty binding. The command payload is carried through untouched.
///
/// # Errors
/// `UnknownPane` if a command names a pane that is not a label of the grid.
pub fn bind_commands(
    session: &str,
    window: &str,
    graph: &PaneGraph,
    commands: &[PaneCommand],
) -> ApplicationResult<Vec<PaneBinding>> {
    let mut bindings: Vec<PaneBinding> = graph
        .iter()
        .filter_map(|visit| {
            visit.node.label().map(|label| PaneBinding {
                label,
                node: visit.id,
                commands: Vec::new(),
            })
        })
        .collect();

    for command in commands {
        let binding = command
            .label()
            .and_then(|label| bindings.iter_mut().find(|b| b.label == label))
            .ok_or_else(|| ApplicationError::UnknownPane {
                session: session.to_string(),
                window: window.to_string(),
                pane: command.pane.clone(),
            })?;
        binding.commands.push(command.clone());
    }

    debug!(
        "bind_commands: {}:{} {} commands on {} panes",
        session,
        window,
        commands.len(),
        bindings.len()
    );
    Ok(bindings)
}
