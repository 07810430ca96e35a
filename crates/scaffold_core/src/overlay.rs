//! Dependency overlay: force-copies known packages into a fresh workspace.

use crate::config::ProvisionerConfig;
use crate::error::Result;
use crate::fsutil;
use tracing::debug;

/// Replaces every configured overlay entry inside
/// `<scratch_root>/<workspace_name>/<dependency_store>` with a fresh copy
/// from the package store.
///
/// Directory entries are handled first, then single-file entries, so a file
/// entry always wins over whatever a directory pass or the generator put
/// there.
///
/// # Errors
///
/// Any removal or copy failure aborts the overlay; entries already replaced
/// stay replaced.
pub fn apply_overlay(config: &ProvisionerConfig, workspace_name: &str) -> Result<()> {
    let overlay = &config.overlay;
    let store = config
        .scratch_root
        .join(workspace_name)
        .join(&overlay.dependency_store);

    for entry in overlay.directories.iter().chain(overlay.files.iter()) {
        let target = store.join(entry);
        let source = overlay.package_store.join(entry);
        debug!(entry = %entry, target = %target.display(), "overlaying dependency");
        fsutil::remove_if_exists(&target)?;
        fsutil::copy_recursive(&source, &target)?;
    }

    Ok(())
}
