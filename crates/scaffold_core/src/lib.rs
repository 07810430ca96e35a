//! Scaffold Core Library
//!
//! Fixture provisioning for end-to-end tests that need a generated project:
//! - Backup snapshots so the expensive generator runs once per variant
//! - A dependency overlay patched into every fresh snapshot
//! - Fresh live workspaces restored from snapshots on demand
//! - Shell and CLI helpers with captured, ANSI-free output
//!
//! # Quick Start
//!
//! ```no_run
//! use scaffold_core::{Provisioner, ProvisionerConfig, RunOptions, DEFAULT_VARIANT};
//!
//! let provisioner = Provisioner::new(ProvisionerConfig::default());
//!
//! // First call generates and caches, later calls only copy.
//! let ws = provisioner.provision(DEFAULT_VARIANT).unwrap();
//!
//! provisioner.new_app("myapp").unwrap();
//! ws.check_files_exist(&["apps/myapp/src/main.ts"]).unwrap();
//!
//! let out = provisioner.run_cli("lint", RunOptions::silenced()).unwrap();
//! assert!(!out.contains('\x1b'));
//! ```
//!
//! # Custom generators
//!
//! Anything implementing [`Generator`] can stand in for the real CLI:
//!
//! ```
//! use scaffold_core::{Generator, Provisioner, ProvisionerConfig, Result, Workspace};
//! use std::path::Path;
//! use tempfile::TempDir;
//!
//! struct Touch;
//!
//! impl Generator for Touch {
//!     fn generate(&self, cwd: &Path, name: &str, _flags: &[String]) -> Result<String> {
//!         Workspace::new(cwd.join(name)).update_file("README.md", "hi")?;
//!         Ok(String::new())
//!     }
//! }
//!
//! let tmp = TempDir::new().unwrap();
//! let mut config = ProvisionerConfig::default();
//! config.scratch_root = tmp.path().join("scratch");
//! config.overlay.directories.clear();
//! config.overlay.files.clear();
//!
//! let provisioner = Provisioner::with_generator(config, Touch);
//! let ws = provisioner.provision("default").unwrap();
//! assert_eq!(ws.read_file("README.md").unwrap(), "hi");
//! ```

mod ansi;
mod config;
mod error;
mod exec;
mod fsutil;
mod generator;
mod overlay;
mod provisioner;
mod workspace;

pub use ansi::strip_ansi;
pub use config::{
    GeneratorConfig, OverlayConfig, ProvisionerConfig, VariantConfig, DEFAULT_VARIANT,
};
pub use error::{Result, ScaffoldError};
pub use exec::{run, run_async, run_lenient, run_stripped, CommandOutput, RunOptions};
pub use fsutil::{
    copy_recursive, directory_exists, exists, file_exists, file_size, remove_if_exists,
};
pub use generator::{CliGenerator, GenerationOutcome, Generator};
pub use overlay::apply_overlay;
pub use provisioner::Provisioner;
pub use workspace::Workspace;
