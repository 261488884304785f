//! Section location within manifest text.
//!
//! The marker-delimited object sections (`/* Begin … section */` pairs) are
//! addressed literally; entry lists nested inside objects (a build phase's
//! `files`, a group's `children`) are addressed by a regular expression
//! whose first capture group is the list body, trailing whitespace excluded
//! so insertions land after the final entry.

use regex::Regex;

use super::PatchError;

/// Half-open byte range of a section's entry list within a document.
///
/// `end` is the insertion point for appending: entries are append-only and
/// new ones land at the end of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

/// Which candidate wins when a pattern matches more than once.
///
/// Manifests repeat structurally similar blocks, and the wiring follows
/// the final one; `First` exists because the two choices are observably
/// different and the policy must be explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    First,
    Last,
}

/// Locates one section's entry list inside manifest text.
#[derive(Debug, Clone)]
pub enum SectionLocator {
    /// A top-level object section bounded by a literal marker pair.
    Delimited {
        label: &'static str,
        begin: &'static str,
        end: &'static str,
    },
    /// An entry list matched by `pattern`, whose capture group 1 is the
    /// list body.
    List {
        label: String,
        pattern: Regex,
        policy: MatchPolicy,
    },
}

impl SectionLocator {
    /// The PBXFileReference object section.
    pub fn file_reference_section() -> Self {
        SectionLocator::Delimited {
            label: "PBXFileReference section",
            begin: "/* Begin PBXFileReference section */",
            end: "/* End PBXFileReference section */",
        }
    }

    /// The PBXBuildFile object section.
    pub fn build_file_section() -> Self {
        SectionLocator::Delimited {
            label: "PBXBuildFile section",
            begin: "/* Begin PBXBuildFile section */",
            end: "/* End PBXBuildFile section */",
        }
    }

    /// The `children` list of the group named `group`.
    pub fn group_children(group: &str) -> Result<Self, PatchError> {
        let pattern = Regex::new(&format!(
            r"/\* {} \*/ = \{{\s*isa = PBXGroup;\s*children = \(([^)]*?)\s*\);",
            regex::escape(group)
        ))?;
        Ok(SectionLocator::List {
            label: format!("children of group {group}"),
            pattern,
            policy: MatchPolicy::Last,
        })
    }

    /// The `files` list of the build phase with identifier `phase_id`.
    pub fn phase_files(phase_id: &str, label: String) -> Result<Self, PatchError> {
        let pattern = Regex::new(&format!(
            r"{} /\* Sources \*/ = \{{[^{{}}]*?files = \(([^)]*?)\s*\);",
            regex::escape(phase_id)
        ))?;
        Ok(SectionLocator::List {
            label,
            pattern,
            policy: MatchPolicy::Last,
        })
    }

    pub fn label(&self) -> &str {
        match self {
            SectionLocator::Delimited { label, .. } => label,
            SectionLocator::List { label, .. } => label,
        }
    }

    /// Find this section's entry list in `text`.
    pub fn locate(&self, text: &str) -> Result<ByteRange, PatchError> {
        match self {
            SectionLocator::Delimited { label, begin, end } => {
                locate_delimited(text, begin, end)
                    .ok_or_else(|| PatchError::SectionNotFound(label.to_string()))
            }
            SectionLocator::List {
                label,
                pattern,
                policy,
            } => {
                let caps = match policy {
                    MatchPolicy::First => pattern.captures(text),
                    MatchPolicy::Last => pattern.captures_iter(text).last(),
                };
                let caps =
                    caps.ok_or_else(|| PatchError::SectionNotFound(label.clone()))?;
                let body = caps
                    .get(1)
                    .expect("list locator pattern captures the entry list");
                Ok(ByteRange {
                    start: body.start(),
                    end: body.end(),
                })
            }
        }
    }
}

/// Entries of a delimited section span the lines between the two markers:
/// from the line after `begin` up to the start of the line holding `end`.
fn locate_delimited(text: &str, begin: &str, end: &str) -> Option<ByteRange> {
    let begin_at = text.find(begin)?;
    let start = match text[begin_at..].find('\n') {
        Some(nl) => begin_at + nl + 1,
        None => text.len(),
    };
    let end_at = start + text[start..].find(end)?;
    let end_line = text[..end_at].rfind('\n').map(|nl| nl + 1).unwrap_or(0);
    Some(ByteRange {
        start,
        end: end_line.max(start),
    })
}
