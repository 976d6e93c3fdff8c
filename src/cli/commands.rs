//! Command dispatch: one handler per subcommand

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{operations, WorkspacePlan};
use crate::cli::args::{Cli, Commands, ConfigCommands, ScriptFormat};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::plan_grid;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::infrastructure::{InfraError, ServiceContainer};

/// Run the parsed command line.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("print help", e))?;
        return Ok(());
    };

    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;
    debug!("project_dir: {}", project_dir.display());
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Grid { file } => cmd_grid(fs.as_ref(), file.as_deref()),
        Commands::Config { command } => cmd_config(fs.as_ref(), command, &project_dir),
        Commands::Check { file } => {
            let container = container(fs, &project_dir)?;
            cmd_check(&container, &workspace_path(&container, &project_dir, file.as_deref()))
        }
        Commands::Plan { file, window } => {
            let container = container(fs, &project_dir)?;
            let path = workspace_path(&container, &project_dir, file.as_deref());
            cmd_plan(&container, &path, window.as_deref())
        }
        Commands::Script {
            file,
            exit_on_error,
            format,
        } => {
            let container = container(fs, &project_dir)?;
            let path = workspace_path(&container, &project_dir, file.as_deref());
            cmd_script(&container, &path, *exit_on_error, *format)
        }
    }
}

fn resolve_project_dir(dir: Option<&Path>) -> CliResult<PathBuf> {
    match dir {
        Some(dir) if !dir.is_dir() => Err(CliError::InvalidArgs(format!(
            "project directory does not exist: {}",
            dir.display()
        ))),
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir().map_err(|e| InfraError::io("current directory", e).into()),
    }
}

fn container(fs: Arc<dyn FileSystem>, project_dir: &Path) -> CliResult<ServiceContainer> {
    let settings = Settings::load_with(fs.as_ref(), Some(project_dir))?;
    Ok(ServiceContainer::with_deps(settings, fs))
}

fn workspace_path(container: &ServiceContainer, project_dir: &Path, file: Option<&Path>) -> PathBuf {
    file.map(Path::to_path_buf)
        .unwrap_or_else(|| container.settings.workspace_path(project_dir))
}

#[instrument(skip(container))]
fn cmd_check(container: &ServiceContainer, path: &Path) -> CliResult<()> {
    let workspace = container.workspace.load(path)?;

    let mut failed = 0;
    for (session, results) in container.layout.plan_each(&workspace) {
        output::header(&format!("session {}", session));
        for result in results {
            match result {
                Ok(plan) => output::success(&format!(
                    "{} ({} panes, {} splits)",
                    plan.window,
                    plan.graph.leaf_count(),
                    plan.graph.len() - plan.graph.leaf_count()
                )),
                Err(e) => {
                    failed += 1;
                    output::failure(&e);
                }
            }
        }
    }

    if failed > 0 {
        return Err(CliError::LayoutFailures { count: failed });
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_plan(container: &ServiceContainer, path: &Path, only: Option<&str>) -> CliResult<()> {
    let workspace = container.workspace.load(path)?;
    let plan = container
        .layout
        .plan_workspace(&workspace, container.settings.exit_on_error)?;
    report_failures(&plan);

    let mut shown = 0;
    for window in plan.windows().filter(|w| only.map_or(true, |name| w.window == name)) {
        shown += 1;
        output::header(&format!("{}:{}", window.session, window.window));
        output::info(&window.graph);
        for binding in window.bindings.iter().filter(|b| !b.is_idle()) {
            for command in &binding.commands {
                let workdir = command
                    .workdir
                    .as_deref()
                    .map(|d| format!(" (in {})", d))
                    .unwrap_or_default();
                output::detail(&format!("{}: {}{}", binding.label, command.command.trim(), workdir));
            }
        }
    }

    if let (Some(name), 0) = (only, shown) {
        return Err(CliError::InvalidArgs(format!("no planned window named '{}'", name)));
    }
    Ok(())
}

#[instrument(skip(fs))]
fn cmd_grid(fs: &dyn FileSystem, file: Option<&Path>) -> CliResult<()> {
    let text = match file {
        Some(path) => fs
            .read_to_string(path)
            .map_err(|e| InfraError::io(format!("read grid {}", path.display()), e))?,
        None => io::read_to_string(io::stdin()).map_err(|e| InfraError::io("read grid from stdin", e))?,
    };
    let graph = plan_grid(&text).map_err(crate::application::ApplicationError::from)?;
    output::info(&graph);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_script(
    container: &ServiceContainer,
    path: &Path,
    exit_on_error: bool,
    format: ScriptFormat,
) -> CliResult<()> {
    let workspace = container.workspace.load(path)?;
    let exit_on_error = exit_on_error || container.settings.exit_on_error;
    let plan = container.layout.plan_workspace(&workspace, exit_on_error)?;
    report_failures(&plan);

    let ops = operations(&plan);
    let rendered = match format {
        ScriptFormat::Shell => container.renderer.render_script(&ops),
        ScriptFormat::Text => container.renderer.render_listing(&ops),
    };
    print!("{}", rendered);
    if format == ScriptFormat::Text && !rendered.is_empty() {
        println!();
    }
    Ok(())
}

fn report_failures(plan: &WorkspacePlan) {
    for failure in &plan.failures {
        output::warning(&format!("skipped: {}", failure));
    }
}

fn cmd_config(fs: &dyn FileSystem, command: &ConfigCommands, project_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load_with(fs, Some(project_dir))?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| describe_path(fs, &p))
                .unwrap_or_else(|| "(no config directory)".to_string());
            output::action("global", &global);
            output::action("local", &describe_path(fs, &local_config_path(project_dir)));
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path()
                    .ok_or_else(|| CliError::Usage("cannot determine global config directory".into()))?
            } else {
                local_config_path(project_dir)
            };
            if fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            fs.ensure_parent(&path)
                .map_err(|e| InfraError::io(format!("create parent of {}", path.display()), e))?;
            fs.write(&path, &Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
            Ok(())
        }
    }
}

fn describe_path(fs: &dyn FileSystem, path: &Path) -> String {
    if fs.exists(path) {
        format!("{} (exists)", path.display())
    } else {
        format!("{} (not found)", path.display())
    }
}
