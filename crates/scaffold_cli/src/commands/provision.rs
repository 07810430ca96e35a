//! Workspace lifecycle commands.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use scaffold_core::Provisioner;

/// Provision the live workspace from a variant snapshot.
pub fn run(provisioner: &Provisioner, variant: &str) -> Result<()> {
    let config = provisioner.config();
    let cached = config
        .variant(variant)
        .map(|v| config.snapshot_path(v).is_dir())
        .unwrap_or(false);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    if cached {
        pb.set_message(format!("Restoring {} from snapshot...", variant));
    } else {
        pb.set_message(format!("Generating {} workspace (first run)...", variant));
    }
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = provisioner.provision(variant);
    pb.finish_and_clear();

    let workspace = match result {
        Ok(workspace) => workspace,
        Err(e) => {
            super::hint(&e);
            return Err(e.into());
        }
    };

    println!(
        "{} Workspace ready at {}",
        style("✓").green(),
        workspace.path().display()
    );
    if !cached {
        println!(
            "  Snapshot saved for variant {}",
            style(variant).cyan()
        );
    }
    Ok(())
}

/// Remove the live workspace.
pub fn cleanup(provisioner: &Provisioner) -> Result<()> {
    provisioner.cleanup()?;
    println!("{} Removed live workspace", style("✓").green());
    Ok(())
}

/// Remove the scratch root and every snapshot.
pub fn purge(provisioner: &Provisioner) -> Result<()> {
    provisioner.purge()?;
    println!(
        "{} Purged {}",
        style("✓").green(),
        provisioner.config().scratch_root.display()
    );
    Ok(())
}
