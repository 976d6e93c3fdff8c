//! Tests for LayoutService: planning a whole workspace

use gridmux::application::services::LayoutService;
use gridmux::application::ApplicationError;
use gridmux::domain::{DomainError, PaneCommand, SessionSpec, WindowSpec, Workspace};
use gridmux::util::testing;

fn window(name: &str, grid: &str) -> WindowSpec {
    WindowSpec {
        name: name.to_string(),
        grid: grid.to_string(),
        commands: Vec::new(),
    }
}

fn workspace() -> Workspace {
    Workspace {
        sessions: vec![
            SessionSpec {
                name: "dev".into(),
                windows: vec![
                    window("editor", "AAB\nAAB\nCCC"),
                    window("broken", "CAC"),
                    window("logs", "AB"),
                ],
            },
            SessionSpec {
                name: "ops".into(),
                windows: vec![window("pinwheel", "AAB\nDEB\nDCC")],
            },
        ],
    }
}

#[test]
fn given_window_when_planning_then_graph_and_bindings_present() {
    let mut editor = window("editor", "AB");
    editor.commands.push(PaneCommand {
        pane: "B".into(),
        command: "htop".into(),
        workdir: None,
    });

    let plan = LayoutService::new().plan_window("dev", &editor).unwrap();

    assert_eq!(plan.session, "dev");
    assert_eq!(plan.window, "editor");
    assert_eq!(plan.graph.leaf_count(), 2);
    assert_eq!(plan.bindings.len(), 2);
    assert!(plan.bindings[0].is_idle());
    assert!(!plan.bindings[1].is_idle());
}

#[test]
fn given_bad_grid_when_planning_window_then_error_carries_names() {
    let err = LayoutService::new()
        .plan_window("dev", &window("broken", "CAC"))
        .unwrap_err();

    assert!(err.is_layout_error());
    match &err {
        ApplicationError::Window {
            session,
            window,
            source,
        } => {
            assert_eq!(session, "dev");
            assert_eq!(window, "broken");
            assert_eq!(source, &DomainError::NonRectangularPane { label: 'C' });
        }
        other => panic!("expected Window error, got {:?}", other),
    }
    assert!(err
        .to_string()
        .starts_with("unable to parse grid for window 'broken' in session 'dev'"));
}

#[test]
fn given_workspace_when_planning_each_then_results_keep_order() {
    let results = LayoutService::new().plan_each(&workspace());

    let names: Vec<&str> = results.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["dev", "ops"]);

    let dev: Vec<bool> = results[0].1.iter().map(Result::is_ok).collect();
    assert_eq!(dev, vec![true, false, true]);
    assert!(results[1].1[0].is_err());
}

#[test]
fn given_failures_and_no_exit_on_error_when_planning_then_skips_and_collects() {
    testing::init_test_setup();

    let plan = LayoutService::new()
        .plan_workspace(&workspace(), false)
        .unwrap();

    assert_eq!(plan.window_count(), 2);
    assert_eq!(plan.failures.len(), 2);
    let windows: Vec<&str> = plan.windows().map(|w| w.window.as_str()).collect();
    assert_eq!(windows, vec!["editor", "logs"]);
    // session with no surviving windows is dropped
    assert_eq!(plan.sessions.len(), 1);
    assert!(plan.failures.iter().all(ApplicationError::is_layout_error));
}

#[test]
fn given_failures_and_exit_on_error_when_planning_then_first_failure_aborts() {
    let err = LayoutService::new()
        .plan_workspace(&workspace(), true)
        .unwrap_err();

    match err {
        ApplicationError::Window { window, .. } => assert_eq!(window, "broken"),
        other => panic!("expected Window error, got {:?}", other),
    }
}

#[test]
fn given_unknown_pane_when_planning_then_failure_is_not_layout_error() {
    let mut editor = window("editor", "AB");
    editor.commands.push(PaneCommand {
        pane: "Q".into(),
        command: "ls".into(),
        workdir: None,
    });
    let workspace = Workspace {
        sessions: vec![SessionSpec {
            name: "dev".into(),
            windows: vec![editor],
        }],
    };

    let plan = LayoutService::new().plan_workspace(&workspace, false).unwrap();

    assert_eq!(plan.window_count(), 0);
    assert!(matches!(plan.failures[0], ApplicationError::UnknownPane { .. }));
    assert!(!plan.failures[0].is_layout_error());
}
