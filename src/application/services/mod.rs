//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem) but are themselves
//! concrete structs, not traits.

mod layout;
mod tmux;
mod workspace;

pub use layout::{LayoutService, SessionPlan, WindowPlan, WorkspacePlan};
pub use tmux::{operations, shell_quote, window_operations, PaneHandle, TmuxOp, TmuxRenderer, Word};
pub use workspace::{validate_workspace, WorkspaceService};
