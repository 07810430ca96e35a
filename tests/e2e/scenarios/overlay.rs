use crate::harness::TestSession;
use std::fs;

/// Every overlay entry is the package-store copy, not the generator's.
#[test]
fn test_overlay_entries_are_fresh() {
    let session = TestSession::new().unwrap();
    let ws = session.provision().unwrap();
    let store = session.package_store();

    for entry in &session.config().overlay.directories {
        let installed = ws.resolve(format!("node_modules/{}", entry));
        assert!(installed.is_dir(), "missing overlay entry {}", entry);
        assert!(installed.join("package.json").exists());
    }

    assert_eq!(
        ws.read_file("node_modules/yargs/index.js").unwrap(),
        fs::read_to_string(store.join("yargs/index.js")).unwrap()
    );
}

/// The bundler executable is replaced after the directory pass.
#[test]
fn test_bundler_file_is_overlay_version() {
    let session = TestSession::new().unwrap();
    let ws = session.provision().unwrap();

    let webpack = ws.read_file("node_modules/.bin/webpack").unwrap();
    assert!(webpack.contains("overlay webpack"));
    assert!(!webpack.contains("generator webpack"));
}

/// The overlay is baked into the snapshot, not re-applied per provision.
#[test]
fn test_overlay_is_part_of_snapshot() {
    let session = TestSession::new().unwrap();
    session.provision().unwrap();

    let snapshot = session.snapshot("default").unwrap();
    let webpack = fs::read_to_string(snapshot.join("node_modules/.bin/webpack")).unwrap();
    assert!(webpack.contains("overlay webpack"));

    // Later edits to the store do not leak into restored workspaces.
    fs::write(session.package_store().join("yargs/index.js"), "changed").unwrap();
    let ws = session.provision().unwrap();
    assert_ne!(ws.read_file("node_modules/yargs/index.js").unwrap(), "changed");
}

/// Applying the overlay to an existing workspace replaces what is there.
#[test]
fn test_apply_overlay_directly() {
    let session = TestSession::new().unwrap();
    let ws = session.provision().unwrap();

    ws.update_file("node_modules/yargs/index.js", "tampered").unwrap();
    ws.update_file("node_modules/yargs/extra.js", "extra").unwrap();
    session.provisioner().apply_overlay("proj").unwrap();

    assert_ne!(ws.read_file("node_modules/yargs/index.js").unwrap(), "tampered");
    assert!(!ws.exists("node_modules/yargs/extra.js"));
}

/// A missing package in the store aborts first-time creation.
#[test]
fn test_missing_store_entry_is_fatal() {
    let session = TestSession::new().unwrap();
    fs::remove_dir_all(session.package_store().join("yargs")).unwrap();

    let result = session.provision();
    assert!(result.is_err());
    assert!(!session.snapshot("default").unwrap().exists());
}
