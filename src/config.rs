//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/gridmux/gridmux.toml`
//! 3. Local config: `<project_dir>/.gridmux.toml`
//! 4. Environment variables: `GRIDMUX_*` prefix
//!
//! CLI flags are applied on top by the command layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Raw settings for intermediate parsing (every field optional).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub tmux_bin: Option<String>,
    pub shell: Option<String>,
    pub workspace_file: Option<PathBuf>,
    pub exit_on_error: Option<bool>,
}

/// Unified configuration for gridmux.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// tmux binary used in rendered commands (default: "tmux")
    pub tmux_bin: String,
    /// Interpreter for the shebang of rendered scripts (default: "/bin/sh")
    pub shell: String,
    /// Workspace file, relative to the project directory (default: "gridmux.yaml")
    pub workspace_file: PathBuf,
    /// Abort on the first window that fails to plan (default: false)
    pub exit_on_error: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tmux_bin: "tmux".into(),
            shell: "/bin/sh".into(),
            workspace_file: PathBuf::from("gridmux.yaml"),
            exit_on_error: false,
        }
    }
}

/// Get the XDG config directory for gridmux.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gridmux").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("gridmux.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".gridmux.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(fs: &dyn FileSystem, path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = fs.read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.workspace_file.to_string_lossy().as_ref());
        self.workspace_file = PathBuf::from(expanded);
        self.tmux_bin = expand_env_vars(&self.tmux_bin);
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            tmux_bin: overlay
                .tmux_bin
                .clone()
                .unwrap_or_else(|| self.tmux_bin.clone()),
            shell: overlay.shell.clone().unwrap_or_else(|| self.shell.clone()),
            workspace_file: overlay
                .workspace_file
                .clone()
                .unwrap_or_else(|| self.workspace_file.clone()),
            exit_on_error: overlay.exit_on_error.unwrap_or(self.exit_on_error),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory holding a local `.gridmux.toml`
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_with(&RealFileSystem, project_dir)
    }

    /// Same as [`Settings::load`], reading config files through `fs`.
    pub fn load_with(fs: &dyn FileSystem, project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if fs.is_file(&global_path) {
                let raw = load_raw_settings(fs, &global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if fs.is_file(&local_path) {
                let raw = load_raw_settings(fs, &local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply GRIDMUX_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("GRIDMUX")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("tmux_bin") {
            settings.tmux_bin = val;
        }
        if let Ok(val) = config.get_string("shell") {
            settings.shell = val;
        }
        if let Ok(val) = config.get_string("workspace_file") {
            settings.workspace_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_bool("exit_on_error") {
            settings.exit_on_error = val;
        }

        Ok(settings)
    }

    /// Workspace file resolved against `project_dir` when relative.
    pub fn workspace_path(&self, project_dir: &Path) -> PathBuf {
        if self.workspace_file.is_absolute() {
            self.workspace_file.clone()
        } else {
            project_dir.join(&self.workspace_file)
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# gridmux configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/gridmux/gridmux.toml
#   Local:  <project_dir>/.gridmux.toml
#   Env:    GRIDMUX_* environment variables

# tmux binary used in rendered commands
# tmux_bin = "tmux"

# Shebang interpreter for `gridmux script`
# shell = "/bin/sh"

# Workspace file, relative to the project directory
# workspace_file = "gridmux.yaml"

# Abort on the first window whose grid cannot be planned
# exit_on_error = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
