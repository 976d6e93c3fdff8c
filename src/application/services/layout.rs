//! Layout planning service
//!
//! Plans every window of a workspace. Windows are independent, so they are
//! planned in parallel; results keep workspace order.

use rayon::prelude::*;
use tracing::{debug, instrument, warn};

use crate::application::binder::{bind_commands, PaneBinding};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{plan_grid, PaneGraph, WindowSpec, Workspace};

/// Planned layout of one window.
#[derive(Debug, Clone)]
pub struct WindowPlan {
    pub session: String,
    pub window: String,
    pub graph: PaneGraph,
    /// One binding per leaf, in pre-order
    pub bindings: Vec<PaneBinding>,
}

/// Windows of one session that planned successfully.
#[derive(Debug, Clone)]
pub struct SessionPlan {
    pub name: String,
    pub windows: Vec<WindowPlan>,
}

/// Outcome of planning a whole workspace.
#[derive(Debug)]
pub struct WorkspacePlan {
    pub sessions: Vec<SessionPlan>,
    /// Windows that failed and were skipped
    pub failures: Vec<ApplicationError>,
}

impl WorkspacePlan {
    pub fn window_count(&self) -> usize {
        self.sessions.iter().map(|s| s.windows.len()).sum()
    }

    pub fn windows(&self) -> impl Iterator<Item = &WindowPlan> {
        self.sessions.iter().flat_map(|s| s.windows.iter())
    }
}

/// Service for turning window grids into pane plans.
#[derive(Debug, Default)]
pub struct LayoutService;

impl LayoutService {
    pub fn new() -> Self {
        Self
    }

    /// Plan a single window and bind its commands.
    #[instrument(level = "debug", skip(self, window), fields(window = %window.name))]
    pub fn plan_window(&self, session: &str, window: &WindowSpec) -> ApplicationResult<WindowPlan> {
        let graph = plan_grid(&window.grid).map_err(|source| ApplicationError::Window {
            session: session.to_string(),
            window: window.name.clone(),
            source,
        })?;
        let bindings = bind_commands(session, &window.name, &graph, &window.commands)?;
        Ok(WindowPlan {
            session: session.to_string(),
            window: window.name.clone(),
            graph,
            bindings,
        })
    }

    /// Plan every window of the workspace, one result per window in order.
    pub fn plan_each(&self, workspace: &Workspace) -> Vec<(String, Vec<ApplicationResult<WindowPlan>>)> {
        workspace
            .sessions
            .iter()
            .map(|session| {
                let results: Vec<_> = session
                    .windows
                    .par_iter()
                    .map(|window| self.plan_window(&session.name, window))
                    .collect();
                (session.name.clone(), results)
            })
            .collect()
    }

    /// Plan the workspace under an exit-on-error policy.
    ///
    /// With `exit_on_error` the first failing window (in workspace order)
    /// aborts the batch. Otherwise failing windows are logged, collected in
    /// `failures` and skipped.
    #[instrument(level = "debug", skip(self, workspace))]
    pub fn plan_workspace(
        &self,
        workspace: &Workspace,
        exit_on_error: bool,
    ) -> ApplicationResult<WorkspacePlan> {
        let mut sessions = Vec::new();
        let mut failures = Vec::new();

        for (name, results) in self.plan_each(workspace) {
            let mut windows = Vec::new();
            for result in results {
                match result {
                    Ok(plan) => windows.push(plan),
                    Err(e) if exit_on_error => return Err(e),
                    Err(e) => {
                        warn!("skipping window: {}", e);
                        failures.push(e);
                    }
                }
            }
            if !windows.is_empty() {
                sessions.push(SessionPlan { name, windows });
            }
        }

        let plan = WorkspacePlan { sessions, failures };
        debug!(
            "plan_workspace: {} windows planned, {} failed",
            plan.window_count(),
            plan.failures.len()
        );
        Ok(plan)
    }
}
