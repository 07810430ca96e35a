//! The fixture provisioner: snapshot cache, workspace reset, and the command
//! helpers that operate on the live workspace.

use crate::config::ProvisionerConfig;
use crate::error::{Result, ScaffoldError};
use crate::exec::{self, CommandOutput, RunOptions};
use crate::fsutil;
use crate::generator::{CliGenerator, GenerationOutcome, Generator};
use crate::overlay;
use crate::workspace::Workspace;
use std::fs;
use tracing::{debug, info};

/// Provisions workspaces for one scratch root.
///
/// Generation is expensive, so the first workspace of every variant is
/// patched and kept as a backup snapshot; later provisions only copy the
/// snapshot. The provisioner does no locking: two processes sharing a
/// scratch root must not provision at the same time.
pub struct Provisioner<G = CliGenerator> {
    config: ProvisionerConfig,
    generator: G,
}

impl Provisioner<CliGenerator> {
    /// Provisioner using the configured command-line generator.
    pub fn new(config: ProvisionerConfig) -> Self {
        let generator = CliGenerator::new(config.generator.binary.clone());
        Self { config, generator }
    }
}

impl<G: Generator> Provisioner<G> {
    /// Provisioner using a custom generator.
    pub fn with_generator(config: ProvisionerConfig, generator: G) -> Self {
        Self { config, generator }
    }

    /// Session configuration.
    pub fn config(&self) -> &ProvisionerConfig {
        &self.config
    }

    /// The generator in use.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Handle on the live workspace.
    pub fn workspace(&self) -> Workspace {
        Workspace::new(self.config.workspace_path())
    }

    /// Makes sure a backup snapshot exists for `variant`, generating and
    /// patching one if needed. Does nothing when the snapshot exists.
    ///
    /// # Errors
    ///
    /// - [`ScaffoldError::UnknownVariant`] for an unconfigured variant
    /// - [`ScaffoldError::GeneratorFailed`] when the generator left no
    ///   workspace behind; other generator failures are logged and ignored
    /// - filesystem errors from the overlay or the final rename
    pub fn ensure_variant(&self, variant: &str) -> Result<()> {
        let variant = self.config.variant(variant)?;
        let snapshot = self.config.snapshot_path(variant);
        if fsutil::directory_exists(&snapshot) {
            debug!(variant = %variant.name, "snapshot present");
            return Ok(());
        }

        let root = &self.config.scratch_root;
        let live = self.config.workspace_path();
        fs::create_dir_all(root).map_err(|e| ScaffoldError::fs("create", root, e))?;
        fsutil::remove_if_exists(&live)?;

        info!(variant = %variant.name, root = %root.display(), "generating workspace");
        let result = self
            .generator
            .generate(root, &self.config.workspace_name, &variant.flags);
        GenerationOutcome::classify(result, &live).into_result()?;

        overlay::apply_overlay(&self.config, &self.config.workspace_name)?;
        fsutil::rename(&live, &snapshot)?;
        info!(variant = %variant.name, snapshot = %snapshot.display(), "snapshot saved");
        Ok(())
    }

    /// Replaces the live workspace with a fresh copy of the `variant`
    /// snapshot, creating the snapshot first when needed.
    pub fn provision(&self, variant: &str) -> Result<Workspace> {
        self.cleanup()?;
        self.ensure_variant(variant)?;

        let snapshot = self.config.snapshot_path(self.config.variant(variant)?);
        let live = self.config.workspace_path();
        fsutil::copy_recursive(&snapshot, &live)?;
        debug!(variant, live = %live.display(), "workspace restored from snapshot");
        Ok(Workspace::new(live))
    }

    /// Applies the dependency overlay to `<scratch_root>/<workspace_name>`.
    pub fn apply_overlay(&self, workspace_name: &str) -> Result<()> {
        overlay::apply_overlay(&self.config, workspace_name)
    }

    /// Removes the live workspace. Snapshots are kept.
    pub fn cleanup(&self) -> Result<()> {
        fsutil::remove_if_exists(&self.config.workspace_path())
    }

    /// Removes the whole scratch root, snapshots included. The next
    /// provision regenerates from scratch.
    pub fn purge(&self) -> Result<()> {
        info!(root = %self.config.scratch_root.display(), "purging scratch root");
        fsutil::remove_if_exists(&self.config.scratch_root)
    }

    /// Cleans up, then runs the workspace-creation script with `args` in the
    /// scratch root and returns its output.
    pub fn create_workspace(&self, args: &str) -> Result<String> {
        self.cleanup()?;
        let root = &self.config.scratch_root;
        fs::create_dir_all(root).map_err(|e| ScaffoldError::fs("create", root, e))?;
        let command = format!("{} {}", self.config.generator.create_workspace_script, args);
        exec::run(&command, root, RunOptions::default())
    }

    /// Runs a shell command in the live workspace. Never fails on exit
    /// status: a failing command yields its stdout followed by its stderr.
    pub fn run_command(&self, command: &str) -> Result<String> {
        exec::run_lenient(command, &self.config.workspace_path())
    }

    /// Runs a shell command in the live workspace on tokio.
    pub async fn run_command_async(&self, command: &str, opts: RunOptions) -> Result<CommandOutput> {
        exec::run_async(command, &self.config.workspace_path(), opts).await
    }

    fn cli_command(&self, args: &str) -> String {
        format!("{} {}", self.config.generator.workspace_cli, args)
    }

    /// Runs the workspace CLI with `args` and returns its output with
    /// terminal escape sequences removed.
    pub fn run_cli(&self, args: &str, opts: RunOptions) -> Result<String> {
        exec::run_stripped(&self.cli_command(args), &self.config.workspace_path(), opts)
    }

    /// Runs the workspace CLI with `args` on tokio.
    pub async fn run_cli_async(&self, args: &str, opts: RunOptions) -> Result<CommandOutput> {
        self.run_command_async(&self.cli_command(args), opts).await
    }

    /// `generate app --no-interactive <name>`
    pub fn new_app(&self, name: &str) -> Result<String> {
        self.run_cli(&format!("generate app --no-interactive {}", name), RunOptions::default())
    }

    /// `generate lib --no-interactive <name>`
    pub fn new_lib(&self, name: &str) -> Result<String> {
        self.run_cli(&format!("generate lib --no-interactive {}", name), RunOptions::default())
    }

    /// `generate module <name>`
    pub fn new_module(&self, name: &str) -> Result<String> {
        self.run_cli(&format!("generate module {}", name), RunOptions::default())
    }
}
