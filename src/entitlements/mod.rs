//! App Group entitlement files.
//!
//! Each file grants one shared-container identifier to a target. Files are
//! written once and never overwritten: the signing toolchain consumes
//! whatever is on disk, so an existing grant is left alone.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Entitlements {
    #[serde(rename = "com.apple.security.application-groups")]
    application_groups: Vec<String>,
}

/// Create the entitlement file at `path` granting `group`, unless the
/// file already exists. Returns whether a write happened.
pub fn write_if_absent(path: &Path, group: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let entitlements = Entitlements {
        application_groups: vec![group.to_string()],
    };
    plist::to_file_xml(path, &entitlements)
        .with_context(|| format!("Failed to write entitlements {}", path.display()))?;

    Ok(true)
}
