//! Idempotent patching of Xcode project manifests.
//!
//! A manifest is loaded whole into a [`Document`], mutated purely in
//! memory, and written back in one atomic replace. Insertion never happens
//! in place: [`Document::insert`] returns a new document and callers
//! re-locate sections on the result, since every splice shifts the offsets
//! after it.

mod section;
mod uid;

pub use section::{ByteRange, MatchPolicy, SectionLocator};
pub use uid::ObjectId;

use std::io::Write;
use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;

/// Manifest loading and patching errors.
///
/// A missing document is fatal for the run; a missing section only skips
/// that one insertion and the caller continues.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("project manifest not found at {}", path.display())]
    DocumentNotFound { path: PathBuf },

    #[error("section not found: {0}")]
    SectionNotFound(String),

    #[error("invalid section pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A project manifest held fully in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Document { text: text.into() }
    }

    /// Load the manifest at `path`. A missing file is `DocumentNotFound`.
    pub fn read(path: &Path) -> Result<Self, PatchError> {
        if !path.exists() {
            return Err(PatchError::DocumentNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(Document {
            text: std::fs::read_to_string(path)?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Idempotence guard: true when a comment marker for `key` already
    /// appears anywhere in the manifest.
    pub fn entry_exists(&self, key: &str) -> bool {
        self.text.contains(&format!("/* {key} */"))
    }

    /// Find a section's entry list in this document.
    pub fn locate(&self, locator: &SectionLocator) -> Result<ByteRange, PatchError> {
        locator.locate(&self.text)
    }

    /// Locator for the Sources build phase of the target named `target`.
    ///
    /// Two-step: the target object names its build phases by identifier,
    /// so the target block is found first and the Sources identifier read
    /// out of its `buildPhases` list.
    pub fn sources_phase(&self, target: &str) -> Result<SectionLocator, PatchError> {
        let label = format!("Sources phase of target {target}");
        let target_pattern = Regex::new(&format!(
            r"/\* {} \*/ = \{{\s*isa = PBXNativeTarget;[^{{}}]*?buildPhases = \(([^)]*?)\s*\);",
            regex::escape(target)
        ))?;
        let phases = target_pattern
            .captures_iter(&self.text)
            .last()
            .ok_or_else(|| PatchError::SectionNotFound(format!("target {target}")))?
            .get(1)
            .expect("target pattern captures the buildPhases list")
            .as_str()
            .to_string();

        let id_pattern = Regex::new(r"([0-9A-F]{24}) /\* Sources \*/")?;
        let phase_id = id_pattern
            .captures(&phases)
            .ok_or_else(|| PatchError::SectionNotFound(label.clone()))?
            .get(1)
            .expect("phase pattern captures the identifier")
            .as_str()
            .to_string();

        SectionLocator::phase_files(&phase_id, label)
    }

    /// Splice `entry` in at `offset`, returning the new document.
    ///
    /// Every byte before and after the splice point is preserved in order.
    pub fn insert(&self, offset: usize, entry: &str) -> Document {
        let mut text = String::with_capacity(self.text.len() + entry.len());
        text.push_str(&self.text[..offset]);
        text.push_str(entry);
        text.push_str(&self.text[offset..]);
        Document { text }
    }

    /// Atomically replace the file at `path` with this document's text.
    ///
    /// Writes to a temporary file in the destination directory and renames
    /// it over the target, so an aborted run never leaves a partial file.
    pub fn save(&self, path: &Path) -> Result<(), PatchError> {
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))?;
        tmp.write_all(self.text.as_bytes())?;
        tmp.persist(path).map_err(|e| PatchError::Io(e.error))?;
        Ok(())
    }
}

/// A renderable manifest entry.
///
/// The variant picks the attribute template; rendering matches the sibling
/// entries' tab indentation, comment-annotated identifiers, and trailing
/// punctuation. Section records render as full lines, list members render
/// with a leading newline so they append after the final existing entry.
#[derive(Debug)]
pub enum PbxEntry<'a> {
    /// A record in the PBXFileReference section.
    FileReference {
        id: &'a ObjectId,
        name: &'a str,
        path: &'a str,
        file_type: &'a str,
    },
    /// A record in the PBXBuildFile section tying a build identifier to a
    /// file reference.
    BuildFile {
        build_id: &'a ObjectId,
        file_id: &'a ObjectId,
        name: &'a str,
    },
    /// A member line inside a build phase's `files` list.
    PhaseMember {
        build_id: &'a ObjectId,
        name: &'a str,
    },
    /// A child line inside a group's `children` list.
    GroupChild { id: &'a ObjectId, name: &'a str },
}

impl PbxEntry<'_> {
    pub fn render(&self) -> String {
        match self {
            PbxEntry::FileReference {
                id,
                name,
                path,
                file_type,
            } => format!(
                "\t\t{id} /* {name} */ = {{isa = PBXFileReference; fileEncoding = 4; lastKnownFileType = {file_type}; name = {name}; path = \"{path}\"; sourceTree = \"<group>\"; }};\n"
            ),
            PbxEntry::BuildFile {
                build_id,
                file_id,
                name,
            } => format!(
                "\t\t{build_id} /* {name} in Sources */ = {{isa = PBXBuildFile; fileRef = {file_id} /* {name} */; }};\n"
            ),
            PbxEntry::PhaseMember { build_id, name } => {
                format!("\n\t\t\t\t{build_id} /* {name} in Sources */,")
            }
            PbxEntry::GroupChild { id, name } => format!("\n\t\t\t\t{id} /* {name} */,"),
        }
    }
}
