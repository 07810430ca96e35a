//! CLI commands.

pub mod inspect;
pub mod provision;
pub mod run;

use anyhow::{Context, Result};
use scaffold_core::{Provisioner, ProvisionerConfig};
use std::path::{Path, PathBuf};

/// Builds a provisioner from the configuration file and command-line
/// overrides.
pub fn load(config_path: &Path, root: Option<PathBuf>) -> Result<Provisioner> {
    let mut config = ProvisionerConfig::load(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    if let Some(root) = root {
        config.scratch_root = root;
    }
    tracing::debug!(root = %config.scratch_root.display(), "configuration loaded");
    Ok(Provisioner::new(config))
}

/// Prints the recovery hint for a scaffold error, if there is one.
pub fn hint(err: &scaffold_core::ScaffoldError) {
    if let Some(suggestion) = err.recovery_suggestion() {
        eprintln!("{} {}", console::style("hint:").cyan(), suggestion);
    }
}
