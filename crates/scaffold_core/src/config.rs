//! Configuration for a provisioning session.

use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the variant used when none is requested.
pub const DEFAULT_VARIANT: &str = "default";

/// Complete configuration of one provisioning session.
///
/// The scratch root is part of the configuration, so two sessions with
/// different roots never touch each other's workspaces or snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionerConfig {
    /// Directory holding the live workspace and all snapshots.
    pub scratch_root: PathBuf,

    /// Directory name of the live workspace under the scratch root.
    pub workspace_name: String,

    /// External generator configuration.
    pub generator: GeneratorConfig,

    /// Dependency overlay applied after first-time generation.
    pub overlay: OverlayConfig,

    /// Known variants.
    pub variants: Vec<VariantConfig>,
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            scratch_root: PathBuf::from("./tmp"),
            workspace_name: "proj".to_string(),
            generator: GeneratorConfig::default(),
            overlay: OverlayConfig::default(),
            variants: vec![
                VariantConfig {
                    name: DEFAULT_VARIANT.to_string(),
                    flags: vec![
                        "--collection=@nrwl/schematics".to_string(),
                        "--npmScope=proj".to_string(),
                    ],
                    snapshot_suffix: "_backup".to_string(),
                },
                VariantConfig {
                    name: "bazel".to_string(),
                    flags: vec![
                        "--collection=@nrwl/bazel".to_string(),
                        "--npmScope=proj".to_string(),
                    ],
                    snapshot_suffix: "_bazel_backup".to_string(),
                },
            ],
        }
    }
}

impl ProvisionerConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| ScaffoldError::ConfigError(format!("failed to read config: {}", e)))?;
            let config: Self = toml::from_str(&content)
                .map_err(|e| ScaffoldError::ConfigError(format!("failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ScaffoldError::ConfigError(format!("failed to serialize config: {}", e)))
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        fs::write(path, content)
            .map_err(|e| ScaffoldError::ConfigError(format!("failed to write config: {}", e)))?;
        Ok(())
    }

    /// Returns a copy of this configuration rooted at a fresh, uniquely
    /// named directory under `base`.
    pub fn with_unique_root(mut self, base: &Path) -> Self {
        self.scratch_root = base.join(format!("scaffold-{}", uuid::Uuid::new_v4()));
        self
    }

    /// Checks values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        let name = self.workspace_name.as_str();
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(ScaffoldError::ConfigError(format!(
                "invalid workspace name: {:?}",
                name
            )));
        }

        let mut names = HashSet::new();
        let mut suffixes = HashSet::new();
        for variant in &self.variants {
            if !names.insert(variant.name.as_str()) {
                return Err(ScaffoldError::ConfigError(format!(
                    "duplicate variant: {}",
                    variant.name
                )));
            }
            if variant.snapshot_suffix.is_empty() {
                return Err(ScaffoldError::ConfigError(format!(
                    "variant {} has an empty snapshot suffix",
                    variant.name
                )));
            }
            if !suffixes.insert(variant.snapshot_suffix.as_str()) {
                return Err(ScaffoldError::ConfigError(format!(
                    "variants share snapshot suffix {}",
                    variant.snapshot_suffix
                )));
            }
        }

        let overlay = &self.overlay;
        if overlay
            .directories
            .iter()
            .chain(overlay.files.iter())
            .any(|entry| entry.trim().is_empty())
        {
            return Err(ScaffoldError::ConfigError(
                "overlay entries must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Looks up a variant by name.
    pub fn variant(&self, name: &str) -> Result<&VariantConfig> {
        self.variants
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| ScaffoldError::UnknownVariant(name.to_string()))
    }

    /// Path of the live workspace.
    pub fn workspace_path(&self) -> PathBuf {
        self.scratch_root.join(&self.workspace_name)
    }

    /// Path of a variant's backup snapshot.
    pub fn snapshot_path(&self, variant: &VariantConfig) -> PathBuf {
        self.scratch_root
            .join(format!("{}{}", self.workspace_name, variant.snapshot_suffix))
    }
}

/// External generator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Generator used for `new`, relative to the scratch root.
    pub binary: String,

    /// CLI used inside the workspace for `generate ...`, relative to the
    /// workspace.
    pub workspace_cli: String,

    /// Command line that creates a workspace from scratch, run in the
    /// scratch root.
    pub create_workspace_script: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            binary: "../node_modules/.bin/ng".to_string(),
            workspace_cli: "./node_modules/.bin/ng".to_string(),
            create_workspace_script:
                "node ../node_modules/@nrwl/schematics/bin/create-nx-workspace.js".to_string(),
        }
    }
}

/// Packages force-copied into a freshly generated workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Source-of-truth package store (the provisioning tool's own).
    pub package_store: PathBuf,

    /// Dependency store directory inside the workspace.
    pub dependency_store: PathBuf,

    /// Package directories, relative to both stores.
    pub directories: Vec<String>,

    /// Single files re-copied after the directory pass, relative to both
    /// stores. Symbolic links are copied as links.
    pub files: Vec<String>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            package_store: PathBuf::from("node_modules"),
            dependency_store: PathBuf::from("node_modules"),
            directories: [
                "@ngrx",
                "@nrwl",
                "angular",
                "@angular/upgrade",
                "npm-run-all",
                "yargs",
                "yargs-parser",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            files: vec![".bin/webpack".to_string()],
        }
    }
}

/// A named generator configuration with its own snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantConfig {
    /// Variant name used by callers.
    pub name: String,

    /// Extra flags passed to `<generator> new`.
    #[serde(default)]
    pub flags: Vec<String>,

    /// Appended to the workspace name to form the snapshot directory.
    pub snapshot_suffix: String,
}
