//! End-to-end tests for command dispatch and exit codes

use std::fs;
use std::path::Path;

use clap::Parser;
use tempfile::TempDir;

use gridmux::cli::args::{Cli, Commands, ScriptFormat};
use gridmux::cli::commands::execute_command;
use gridmux::cli::CliError;
use gridmux::exitcode;

const GOOD: &str = r#"
sessions:
  - name: dev
    windows:
      - name: editor
        grid: |
          AAB
          AAB
          CCC
        commands:
          - pane: A
            command: vim
"#;

const ONE_BROKEN: &str = r#"
sessions:
  - name: dev
    windows:
      - name: editor
        grid: AB
      - name: broken
        grid: CAC
"#;

fn project(workspace: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("gridmux.yaml"), workspace).unwrap();
    dir
}

fn run(dir: &Path, args: &[&str]) -> Result<(), CliError> {
    let mut argv = vec!["gridmux", "-C", dir.to_str().unwrap()];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).expect("arguments parse");
    execute_command(&cli)
}

#[test]
fn given_script_flags_when_parsing_then_fields_set() {
    let cli = Cli::try_parse_from(["gridmux", "-vv", "script", "-e", "--format", "text"]).unwrap();

    assert_eq!(cli.verbose, 2);
    match cli.command {
        Some(Commands::Script {
            exit_on_error,
            format,
            file,
        }) => {
            assert!(exit_on_error);
            assert_eq!(format, ScriptFormat::Text);
            assert!(file.is_none());
        }
        other => panic!("expected script command, got {:?}", other),
    }
}

#[test]
fn given_valid_workspace_when_check_then_succeeds() {
    let dir = project(GOOD);

    assert!(run(dir.path(), &["check"]).is_ok());
}

#[test]
fn given_broken_window_when_check_then_layout_failures_with_dataerr() {
    let dir = project(ONE_BROKEN);

    let err = run(dir.path(), &["check"]).unwrap_err();

    assert!(matches!(err, CliError::LayoutFailures { count: 1 }));
    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_broken_window_when_script_then_skips_it() {
    let dir = project(ONE_BROKEN);

    assert!(run(dir.path(), &["script", "--format", "text"]).is_ok());
}

#[test]
fn given_broken_window_and_exit_on_error_when_script_then_fails() {
    let dir = project(ONE_BROKEN);

    let err = run(dir.path(), &["script", "--exit-on-error"]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::DATAERR);
    assert!(err.to_string().contains("'broken'"), "{}", err);
}

#[test]
fn given_missing_workspace_when_plan_then_noinput() {
    let dir = TempDir::new().unwrap();

    let err = run(dir.path(), &["plan"]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_unknown_window_filter_when_plan_then_invalid_args() {
    let dir = project(GOOD);

    let err = run(dir.path(), &["plan", "--window", "nope"]).unwrap_err();

    assert!(matches!(err, CliError::InvalidArgs(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_explicit_file_when_plan_then_uses_it() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("other.yaml");
    fs::write(&file, GOOD).unwrap();

    assert!(run(dir.path(), &["plan", "-f", file.to_str().unwrap(), "-w", "editor"]).is_ok());
}

#[test]
fn given_grid_file_when_grid_then_plans_it() {
    let dir = TempDir::new().unwrap();
    let grid = dir.path().join("layout.txt");
    fs::write(&grid, "AB\nCD\n").unwrap();

    assert!(run(dir.path(), &["grid", grid.to_str().unwrap()]).is_ok());
}

#[test]
fn given_pinwheel_grid_file_when_grid_then_dataerr() {
    let dir = TempDir::new().unwrap();
    let grid = dir.path().join("layout.txt");
    fs::write(&grid, "AAB\nDEB\nDCC\n").unwrap();

    let err = run(dir.path(), &["grid", grid.to_str().unwrap()]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_unknown_pane_in_workspace_when_check_then_reported_as_failure() {
    let dir = project(
        "sessions:\n  - name: dev\n    windows:\n      - name: w\n        grid: AB\n        commands:\n          - {pane: Q, command: ls}\n",
    );

    let err = run(dir.path(), &["check"]).unwrap_err();

    assert!(matches!(err, CliError::LayoutFailures { count: 1 }));
}

#[test]
fn given_invalid_workspace_when_check_then_config_exit_code() {
    let dir = project("sessions: []");

    let err = run(dir.path(), &["check"]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::CONFIG);
}

#[test]
fn given_no_local_config_when_config_init_then_creates_template_once() {
    let dir = TempDir::new().unwrap();

    run(dir.path(), &["config", "init"]).unwrap();

    let created = dir.path().join(".gridmux.toml");
    let content = fs::read_to_string(&created).unwrap();
    assert!(content.contains("# gridmux configuration"));

    let err = run(dir.path(), &["config", "init"]).unwrap_err();
    assert!(matches!(err, CliError::Usage(_)));
}

#[test]
fn given_missing_project_dir_when_running_then_usage_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");

    let err = run(&missing, &["check"]).unwrap_err();

    assert!(matches!(err, CliError::InvalidArgs(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_malformed_yaml_when_check_then_config_exit_code() {
    let dir = project("sessions: [ {name: dev");

    let err = run(dir.path(), &["check"]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::CONFIG);
}
