use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::FileEntry;

/// A complete wiring run: which manifest to patch, which files go where,
/// and which entitlement files to create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WirePlan {
    /// Path of the project manifest (`project.pbxproj`) to patch.
    pub project: PathBuf,
    /// App Group identifier shared by the app and the extension.
    pub app_group: String,
    /// Entitlement files to create when absent. Existing files are never
    /// overwritten.
    #[serde(default)]
    pub entitlements: Vec<PathBuf>,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

impl WirePlan {
    /// Load a plan from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read wire plan {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid wire plan {}", path.display()))
    }

    /// Directory the manifest's file paths are relative to: the parent of
    /// the `.xcodeproj` bundle holding the manifest.
    pub fn source_root(&self) -> &Path {
        self.project
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or_else(|| Path::new("."))
    }
}
