//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{LayoutService, TmuxRenderer, WorkspaceService};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    pub workspace: WorkspaceService,
    pub layout: LayoutService,
    pub renderer: TmuxRenderer,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        Self {
            workspace: WorkspaceService::new(fs),
            layout: LayoutService::new(),
            renderer: TmuxRenderer::new(settings.clone()),
            settings,
        }
    }
}
