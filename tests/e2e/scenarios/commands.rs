use crate::harness::assertions::assert_no_escapes;
use crate::harness::TestSession;
use scaffold_core::{strip_ansi, RunOptions, ScaffoldError};

/// Generator subcommands run in the workspace and return plain text.
#[test]
fn test_generate_app_lib_module() {
    let session = TestSession::new().unwrap();
    let ws = session.provision().unwrap();
    let provisioner = session.provisioner();

    let out = provisioner.new_app("myapp").unwrap();
    assert_no_escapes(&out).unwrap();
    assert_eq!(out, "CREATE apps/myapp/src/index.ts (12 bytes)\n");

    provisioner.new_lib("mylib").unwrap();
    provisioner.new_module("mymodule").unwrap();
    ws.check_files_exist(&[
        "apps/myapp/src/index.ts",
        "libs/mylib/src/index.ts",
        "src/app/mymodule/index.ts",
    ])
    .unwrap();

    let calls = session.generator().calls().unwrap();
    assert!(calls.contains(&"generate app --no-interactive myapp".to_string()));
    assert!(calls.contains(&"generate lib --no-interactive mylib".to_string()));
    assert!(calls.contains(&"generate module mymodule".to_string()));
}

/// Stripping keeps every visible character.
#[test]
fn test_stripped_output_matches_visible_text() {
    let session = TestSession::new().unwrap();
    session.provision().unwrap();

    let raw = session.provisioner().run_command("sh ./node_modules/.bin/ng generate app demo").unwrap();
    assert!(raw.contains('\x1b'));

    session.provision().unwrap();
    let stripped = session.provisioner().run_cli("generate app demo", RunOptions::default()).unwrap();
    assert_eq!(stripped, strip_ansi(&raw));
    assert_no_escapes(&stripped).unwrap();
}

/// Silenced failures return output; unsilenced ones carry the same output.
#[test]
fn test_cli_error_silencing() {
    let session = TestSession::new().unwrap();
    session.provision().unwrap();
    let provisioner = session.provisioner();

    let silenced = provisioner.run_cli("lint", RunOptions::silenced()).unwrap();
    assert_eq!(silenced, "lint: 2 problems\n");

    let err = provisioner.run_cli("lint", RunOptions::default()).unwrap_err();
    match &err {
        ScaffoldError::CommandFailed { code, stdout, stderr, .. } => {
            assert_eq!(*code, Some(1));
            assert_eq!(stdout, &silenced);
            assert_eq!(stderr, "lint failed\n");
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// run_command never fails on exit status.
#[test]
fn test_run_command_returns_both_streams_on_failure() {
    let session = TestSession::new().unwrap();
    session.provision().unwrap();

    let out = session.provisioner().run_command("sh ./node_modules/.bin/ng lint").unwrap();
    assert_eq!(out, "lint: 2 problems\nlint failed\n");

    let pwd = session.provisioner().run_command("pwd").unwrap();
    assert!(pwd.trim_end().ends_with("/proj"));
}

#[tokio::test]
async fn test_async_command_resolves_with_both_streams() {
    let session = TestSession::new().unwrap();
    session.provision().unwrap();

    let out = session
        .provisioner()
        .run_command_async("echo out; echo err >&2", RunOptions::default())
        .await
        .unwrap();
    assert_eq!(out.stdout, "out\n");
    assert_eq!(out.stderr, "err\n");
}

#[tokio::test]
async fn test_async_cli_error_silencing() {
    let session = TestSession::new().unwrap();
    session.provision().unwrap();
    let provisioner = session.provisioner();

    let err = provisioner
        .run_cli_async("lint", RunOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.captured_output(), Some(("lint: 2 problems\n", "lint failed\n")));

    let out = provisioner
        .run_cli_async("lint", RunOptions::silenced())
        .await
        .unwrap();
    assert_eq!(out.stdout, "lint: 2 problems\n");
    assert_eq!(out.stderr, "lint failed\n");
}

/// The creation script runs in the scratch root after cleanup.
#[test]
fn test_create_workspace_runs_script_in_root() {
    let session = TestSession::new().unwrap();
    session.provision().unwrap();

    let mut config = session.config().clone();
    config.generator.create_workspace_script = "echo created with".to_string();
    let provisioner = scaffold_core::Provisioner::new(config);
    let out = provisioner.create_workspace("myworkspace --npmScope=x").unwrap();

    assert_eq!(out, "created with myworkspace --npmScope=x\n");
    assert!(!provisioner.workspace().path().exists());
}
