use serde::{Deserialize, Serialize};

/// The file types the wiring understands.
///
/// Each maps to the manifest's `lastKnownFileType` attribute value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Swift,
    ObjC,
    Plist,
    Entitlements,
}

impl FileKind {
    pub fn last_known_file_type(&self) -> &'static str {
        match self {
            Self::Swift => "sourcecode.swift",
            Self::ObjC => "sourcecode.c.objc",
            Self::Plist => "text.plist.xml",
            Self::Entitlements => "text.plist.entitlements",
        }
    }
}

/// One file to wire into the project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// Display name. Doubles as the idempotence key: a manifest that
    /// already carries a `/* name */` marker is left alone for this file.
    pub name: String,
    /// On-disk path, relative to the directory holding the `.xcodeproj`.
    pub path: String,
    pub kind: FileKind,
    /// Targets whose Sources phase compiles this file.
    #[serde(default)]
    pub targets: Vec<String>,
    /// Group whose children list shows the file, if any.
    #[serde(default)]
    pub group: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        let entry: FileEntry = serde_json::from_str(
            r#"{"name": "Widget.swift", "path": "Extension/Widget.swift", "kind": "swift"}"#,
        )
        .expect("valid entry");
        assert_eq!(entry.kind, FileKind::Swift);
        assert!(entry.targets.is_empty());
        assert!(entry.group.is_none());
    }

    #[test]
    fn test_file_types() {
        assert_eq!(FileKind::Swift.last_known_file_type(), "sourcecode.swift");
        assert_eq!(FileKind::ObjC.last_known_file_type(), "sourcecode.c.objc");
        assert_eq!(
            FileKind::Entitlements.last_known_file_type(),
            "text.plist.entitlements"
        );
    }
}
