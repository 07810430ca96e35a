//! Command execution inside the live workspace.

use anyhow::{Context, Result};
use scaffold_core::{Provisioner, RunOptions};

/// Generator schematics reachable from the CLI.
#[derive(Debug, Clone, Copy)]
pub enum Schematic {
    /// `generate app`
    App,
    /// `generate lib`
    Lib,
    /// `generate module`
    Module,
}

/// Run a shell command and print its stdout.
pub fn run(provisioner: &Provisioner, command: &str, silence_error: bool) -> Result<()> {
    let workspace = provisioner.workspace();
    let output = scaffold_core::run(command, workspace.path(), RunOptions { silence_error })
        .inspect_err(super::hint)?;
    print!("{}", output);
    Ok(())
}

/// Run a shell command on the tokio runtime and print both streams.
pub fn run_async(provisioner: &Provisioner, command: &str, silence_error: bool) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let output = runtime
        .block_on(provisioner.run_command_async(command, RunOptions { silence_error }))
        .inspect_err(super::hint)?;
    print!("{}", output.stdout);
    eprint!("{}", output.stderr);
    Ok(())
}

/// Run a generator schematic with the workspace CLI.
pub fn generate(provisioner: &Provisioner, schematic: Schematic, name: &str) -> Result<()> {
    let output = match schematic {
        Schematic::App => provisioner.new_app(name),
        Schematic::Lib => provisioner.new_lib(name),
        Schematic::Module => provisioner.new_module(name),
    }
    .inspect_err(super::hint)?;
    print!("{}", output);
    Ok(())
}
