//! Applies a [`WirePlan`] to a project manifest.
//!
//! One linear pass: every planned file is guarded by the document-wide
//! marker check, then spliced into each of its target sections in order.
//! A section that cannot be located skips that insertion only; the run
//! continues. The manifest is saved once, atomically, and only when it
//! actually changed.

use std::path::PathBuf;

use anyhow::Result;

use crate::entitlements;
use crate::models::{FileEntry, FileOutcome, SectionOutcome, WirePlan, WireReport};
use crate::pbx::{Document, ObjectId, PbxEntry, SectionLocator};

/// Patch the manifest and write missing entitlement files.
///
/// Fatal only when the manifest itself is missing or unreadable; every
/// other miss is recorded in the report and the run continues.
pub fn apply(plan: &WirePlan) -> Result<WireReport> {
    let original = Document::read(&plan.project)?;
    let mut doc = original.clone();
    let mut report = WireReport::default();

    for file in &plan.files {
        let (next, outcome) = wire_file(doc, file);
        doc = next;
        report.files.push(outcome);
    }

    if doc != original {
        doc.save(&plan.project)?;
        tracing::debug!(manifest = %plan.project.display(), "manifest updated");
    }

    for path in &plan.entitlements {
        if entitlements::write_if_absent(path, &plan.app_group)? {
            report.entitlements_written.push(path.clone());
        } else {
            report.entitlements_present.push(path.clone());
        }
    }

    Ok(report)
}

/// Write only the entitlement files of the plan, touching nothing else.
pub fn apply_entitlements(plan: &WirePlan) -> Result<WireReport> {
    let mut report = WireReport::default();
    for path in &plan.entitlements {
        if entitlements::write_if_absent(path, &plan.app_group)? {
            report.entitlements_written.push(path.clone());
        } else {
            report.entitlements_present.push(path.clone());
        }
    }
    Ok(report)
}

/// Wire one file into every section the plan names for it.
///
/// The idempotence guard runs once, before any insertion: a key whose
/// marker is anywhere in the manifest skips the whole file, so a second
/// run over the same plan is a byte-for-byte no-op.
fn wire_file(doc: Document, file: &FileEntry) -> (Document, FileOutcome) {
    if doc.entry_exists(&file.name) {
        tracing::debug!(key = %file.name, "already wired, skipping");
        return (
            doc,
            FileOutcome::AlreadyPresent {
                key: file.name.clone(),
            },
        );
    }

    let file_id = ObjectId::generate();
    let mut sections = Vec::new();
    let mut doc = doc;

    let reference = PbxEntry::FileReference {
        id: &file_id,
        name: &file.name,
        path: &file.path,
        file_type: file.kind.last_known_file_type(),
    }
    .render();
    doc = insert_into(
        doc,
        &SectionLocator::file_reference_section(),
        &reference,
        &mut sections,
    );

    for target in &file.targets {
        // Locate the phase before minting anything, so a missing target
        // never leaves a dangling PBXBuildFile record behind.
        let locator = match doc.sources_phase(target) {
            Ok(locator) => locator,
            Err(err) => {
                tracing::warn!("{err}, skipping insertion");
                sections.push(SectionOutcome::Missing {
                    section: format!("Sources phase of target {target}"),
                });
                continue;
            }
        };

        let build_id = ObjectId::generate();
        let record = PbxEntry::BuildFile {
            build_id: &build_id,
            file_id: &file_id,
            name: &file.name,
        }
        .render();
        doc = insert_into(
            doc,
            &SectionLocator::build_file_section(),
            &record,
            &mut sections,
        );

        let member = PbxEntry::PhaseMember {
            build_id: &build_id,
            name: &file.name,
        }
        .render();
        doc = insert_into(doc, &locator, &member, &mut sections);
    }

    if let Some(group) = &file.group {
        let child = PbxEntry::GroupChild {
            id: &file_id,
            name: &file.name,
        }
        .render();
        match SectionLocator::group_children(group) {
            Ok(locator) => doc = insert_into(doc, &locator, &child, &mut sections),
            Err(err) => {
                tracing::warn!("{err}, skipping insertion");
                sections.push(SectionOutcome::Missing {
                    section: format!("children of group {group}"),
                });
            }
        }
    }

    (
        doc,
        FileOutcome::Wired {
            key: file.name.clone(),
            sections,
        },
    )
}

/// Locate on the current document and splice at the end of the entry list.
/// A miss records the outcome and leaves the document as it was.
fn insert_into(
    doc: Document,
    locator: &SectionLocator,
    entry: &str,
    sections: &mut Vec<SectionOutcome>,
) -> Document {
    match doc.locate(locator) {
        Ok(range) => {
            sections.push(SectionOutcome::Inserted {
                section: locator.label().to_string(),
            });
            doc.insert(range.end, entry)
        }
        Err(err) => {
            tracing::warn!("{err}, skipping insertion");
            sections.push(SectionOutcome::Missing {
                section: locator.label().to_string(),
            });
            doc
        }
    }
}

/// Read-only verification that the planned files and entitlement files
/// exist on disk.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub present: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
}

impl CheckReport {
    pub fn ok(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Check every path the plan touches: the manifest, each planned file
/// (resolved against the project's source root), each entitlement file.
pub fn check(plan: &WirePlan) -> CheckReport {
    let mut report = CheckReport::default();
    let root = plan.source_root();

    let mut note = |path: PathBuf| {
        if path.exists() {
            report.present.push(path);
        } else {
            report.missing.push(path);
        }
    };

    note(plan.project.clone());
    for file in &plan.files {
        note(root.join(&file.path));
    }
    for path in &plan.entitlements {
        note(path.clone());
    }

    report
}
