//! Workspace loading service
//!
//! Reads the YAML workspace file and checks it before any grid is planned.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, ResultExt};
use crate::domain::Workspace;
use crate::infrastructure::traits::FileSystem;

/// Service for loading and validating workspace files.
pub struct WorkspaceService {
    fs: Arc<dyn FileSystem>,
}

impl WorkspaceService {
    /// Create a new workspace service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load and validate a workspace file.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Workspace> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::OperationFailed {
                context: format!("workspace file not found: {}", path.display()),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "file does not exist",
                )),
            });
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read workspace", path)?;
        let workspace = decode(&content).with_path_context("parse workspace YAML", path)?;
        validate_workspace(&workspace)?;
        debug!("load: {} sessions", workspace.sessions.len());
        Ok(workspace)
    }

    /// Parse and validate workspace YAML.
    pub fn parse(&self, content: &str) -> ApplicationResult<Workspace> {
        let workspace = decode(content).with_context("parse workspace YAML")?;
        validate_workspace(&workspace)?;
        debug!("parse: {} sessions", workspace.sessions.len());
        Ok(workspace)
    }
}

fn decode(content: &str) -> Result<Workspace, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

/// Structural checks on a workspace. Grids are only checked for emptiness;
/// their layout is validated by the planner.
pub fn validate_workspace(workspace: &Workspace) -> ApplicationResult<()> {
    if workspace.sessions.is_empty() {
        return Err(ApplicationError::invalid("at least one session is required"));
    }

    for session in &workspace.sessions {
        if session.name.trim().is_empty() {
            return Err(ApplicationError::invalid("session name is required"));
        }
        if session.windows.is_empty() {
            return Err(ApplicationError::invalid(format!(
                "at least one window is required for session '{}'",
                session.name
            )));
        }
        for window in &session.windows {
            if window.name.trim().is_empty() {
                return Err(ApplicationError::invalid(format!(
                    "window name is required in session '{}'",
                    session.name
                )));
            }
            if window.grid.trim().is_empty() {
                return Err(ApplicationError::invalid(format!(
                    "grid for window '{}' in session '{}' is empty",
                    window.name, session.name
                )));
            }
        }
    }
    Ok(())
}
