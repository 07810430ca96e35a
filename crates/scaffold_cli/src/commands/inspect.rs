//! Read-only workspace inspection.

use anyhow::Result;
use console::style;
use scaffold_core::Provisioner;

/// Fail unless every path exists.
pub fn check(provisioner: &Provisioner, paths: &[String]) -> Result<()> {
    provisioner.workspace().check_files_exist(paths)?;
    println!("{} {} path(s) present", style("✓").green(), paths.len());
    Ok(())
}

/// Print a file, optionally as pretty JSON.
pub fn read(provisioner: &Provisioner, path: &str, json: bool) -> Result<()> {
    let workspace = provisioner.workspace();
    if json {
        let value: serde_json::Value = workspace.read_json(path)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", workspace.read_file(path)?);
    }
    Ok(())
}

/// Print a file's size in bytes.
pub fn size(provisioner: &Provisioner, path: &str) -> Result<()> {
    println!("{}", provisioner.workspace().file_size(path)?);
    Ok(())
}

/// Print the effective configuration.
pub fn config(provisioner: &Provisioner) -> Result<()> {
    print!("{}", provisioner.config().to_toml()?);
    Ok(())
}
