use crate::harness::assertions::assert_same_tree;
use crate::harness::TestSession;
use scaffold_core::ScaffoldError;
use std::fs;

/// Provisioning twice generates once; the second call only copies.
#[test]
fn test_second_provision_reuses_snapshot() {
    let session = TestSession::new().unwrap();

    session.provision().unwrap();
    assert_eq!(session.generator().generations().unwrap(), 1);

    session.provision().unwrap();
    assert_eq!(session.generator().generations().unwrap(), 1);

    let snapshot = session.snapshot("default").unwrap();
    assert!(snapshot.is_dir());
    assert_same_tree(&snapshot, &session.config().workspace_path()).unwrap();
}

/// The generator is called as `<bin> new <name> --no-interactive <flags>`.
#[test]
fn test_generator_invocation_per_variant() {
    let session = TestSession::new().unwrap();

    session.provisioner().provision("default").unwrap();
    session.provisioner().provision("bazel").unwrap();
    session.provisioner().provision("bazel").unwrap();

    let calls = session.generator().calls().unwrap();
    assert_eq!(
        calls,
        vec![
            "new proj --no-interactive --collection=@nrwl/schematics --npmScope=proj".to_string(),
            "new proj --no-interactive --collection=@nrwl/bazel --npmScope=proj".to_string(),
        ]
    );

    assert!(session.snapshot("default").unwrap().is_dir());
    assert!(session.snapshot("bazel").unwrap().is_dir());
    let ws = session.provisioner().workspace();
    assert!(ws
        .read_file("generator-flags.txt")
        .unwrap()
        .contains("@nrwl/bazel"));
}

/// Changes to the live workspace never reach the snapshot.
#[test]
fn test_live_workspace_is_isolated_from_snapshot() {
    let session = TestSession::new().unwrap();
    let ws = session.provision().unwrap();
    let snapshot = session.snapshot("default").unwrap();

    ws.update_file("package.json", "{}").unwrap();
    ws.update_file("apps/extra/main.ts", "extra").unwrap();
    fs::remove_dir_all(ws.resolve("libs")).unwrap();

    assert_eq!(
        fs::read_to_string(snapshot.join("package.json")).unwrap(),
        "{\"name\": \"proj\", \"version\": \"0.0.0\"}\n"
    );
    assert!(!snapshot.join("apps/extra").exists());
    assert!(snapshot.join("libs").is_dir());

    let fresh = session.provision().unwrap();
    assert!(!fresh.exists("apps/extra"));
    assert!(fresh.exists("libs"));
}

/// A generator that exits non-zero after scaffolding is tolerated.
#[test]
fn test_benign_generator_exit_is_ignored() {
    let session = TestSession::builder().generator_exit_code(1).build().unwrap();

    let ws = session.provision().unwrap();
    ws.check_files_exist(&["package.json", "node_modules/yargs/index.js"])
        .unwrap();
    assert_eq!(session.generator().generations().unwrap(), 1);
}

/// A generator that fails without output leaves no snapshot behind.
#[test]
fn test_generator_without_workspace_is_fatal() {
    let session = TestSession::builder().generator_creates_nothing().build().unwrap();

    let err = session.provision().unwrap_err();
    let err = err.downcast::<ScaffoldError>().unwrap();
    assert!(matches!(err, ScaffoldError::GeneratorFailed { .. }));
    assert!(err.captured_output().is_some());
    assert!(!session.snapshot("default").unwrap().exists());

    // Nothing was cached, so the next attempt runs the generator again.
    assert!(session.provision().is_err());
    assert_eq!(session.generator().generations().unwrap(), 2);
}

/// Two sessions in one process never share snapshots.
#[test]
fn test_sessions_are_independent() {
    let first = TestSession::new().unwrap();
    let second = TestSession::new().unwrap();

    first.provision().unwrap();
    assert!(!second.snapshot("default").unwrap().exists());

    second.provision().unwrap();
    assert_eq!(first.generator().generations().unwrap(), 1);
    assert_eq!(second.generator().generations().unwrap(), 1);
}

/// Scratch roots side by side under one directory keep separate caches.
#[test]
fn test_sibling_scratch_roots_are_independent() {
    let session = TestSession::new().unwrap();
    let sibling = session.sibling();
    assert_ne!(sibling.config().scratch_root, session.config().scratch_root);
    assert!(sibling.config().scratch_root.starts_with(session.base()));

    session.provision().unwrap();
    let snapshot = sibling
        .config()
        .snapshot_path(sibling.config().variant("default").unwrap());
    assert!(!snapshot.exists());

    sibling.provision("default").unwrap();
    assert!(snapshot.is_dir());
    assert_eq!(session.generator().generations().unwrap(), 2);
}

#[test]
fn test_snapshot_keeps_executable_bits() {
    use std::os::unix::fs::PermissionsExt;

    let session = TestSession::new().unwrap();
    let ws = session.provision().unwrap();

    let mode = fs::metadata(ws.resolve("node_modules/.bin/ng"))
        .unwrap()
        .permissions()
        .mode();
    assert_ne!(mode & 0o111, 0);
}
