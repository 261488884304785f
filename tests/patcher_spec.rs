use speculate2::speculate;
use xcwire::pbx::{Document, ObjectId, PbxEntry, SectionLocator};

const MANIFEST: &str = include_str!("fixtures/project.pbxproj");

speculate! {
    before {
        let doc = Document::new(MANIFEST);
    }

    describe "entry_exists" {
        it "finds markers already in the manifest" {
            assert!(doc.entry_exists("AppDelegate.swift"));
            assert!(doc.entry_exists("WidgetBundle.swift"));
        }

        it "does not find absent keys" {
            assert!(!doc.entry_exists("Missing.swift"));
        }
    }

    describe "locate_section" {
        it "finds the file reference section" {
            let range = doc
                .locate(&SectionLocator::file_reference_section())
                .expect("section present");
            let body = &doc.as_str()[range.start..range.end];
            assert!(body.contains("AppDelegate.swift"));
            assert!(!body.contains("Begin PBXFileReference"));
            assert!(!body.contains("End PBXFileReference"));
        }

        it "finds the build file section" {
            let range = doc
                .locate(&SectionLocator::build_file_section())
                .expect("section present");
            let body = &doc.as_str()[range.start..range.end];
            assert!(body.contains("AppDelegate.swift in Sources"));
        }

        it "finds a group children list" {
            let locator = SectionLocator::group_children("AtlasWidgetExtension")
                .expect("valid group name");
            let range = doc.locate(&locator).expect("group present");
            let body = &doc.as_str()[range.start..range.end];
            assert!(body.contains("WidgetBundle.swift"));
            // trailing whitespace stays outside the range so appends line up
            assert!(body.ends_with(','));
        }

        it "finds the sources phase of a target" {
            let locator = doc
                .sources_phase("AtlasWidgetExtension")
                .expect("target present");
            let range = doc.locate(&locator).expect("phase present");
            let body = &doc.as_str()[range.start..range.end];
            assert!(body.contains("WidgetBundle.swift in Sources"));
            assert!(!body.contains("AppDelegate.swift"));
        }

        it "reports a missing target" {
            assert!(doc.sources_phase("Ghost").is_err());
        }

        it "reports a missing section" {
            let bare = Document::new("{ objects = {}; }\n");
            assert!(bare
                .locate(&SectionLocator::file_reference_section())
                .is_err());
        }

        it "takes the last match when a pattern repeats" {
            let text = "\t\tAAAA00000000000000000001 /* Shared */ = {\n\
                \t\t\tisa = PBXGroup;\n\
                \t\t\tchildren = (\n\
                \t\t\t\tBBBB00000000000000000001 /* First.swift */,\n\
                \t\t\t);\n\
                \t\t};\n\
                \t\tAAAA00000000000000000002 /* Shared */ = {\n\
                \t\t\tisa = PBXGroup;\n\
                \t\t\tchildren = (\n\
                \t\t\t\tBBBB00000000000000000002 /* Second.swift */,\n\
                \t\t\t);\n\
                \t\t};\n";
            let dup = Document::new(text);
            let locator = SectionLocator::group_children("Shared").expect("valid group name");
            let range = dup.locate(&locator).expect("group present");
            let body = &dup.as_str()[range.start..range.end];
            assert!(body.contains("Second.swift"));
            assert!(!body.contains("First.swift"));
        }
    }

    describe "insert" {
        it "preserves every byte outside the spliced region" {
            let range = doc
                .locate(&SectionLocator::file_reference_section())
                .expect("section present");
            let entry = "\t\tNEW /* New.swift */;\n";
            let patched = doc.insert(range.end, entry);

            assert_eq!(&patched.as_str()[..range.end], &doc.as_str()[..range.end]);
            assert_eq!(
                &patched.as_str()[range.end + entry.len()..],
                &doc.as_str()[range.end..]
            );
        }

        it "adds exactly one entry between the markers of an empty section" {
            let empty = Document::new(
                "/* Begin PBXFileReference section */\n/* End PBXFileReference section */\n",
            );
            let id = ObjectId::generate();
            let entry = PbxEntry::FileReference {
                id: &id,
                name: "Foo.swift",
                path: "Foo.swift",
                file_type: "sourcecode.swift",
            }
            .render();
            let range = empty
                .locate(&SectionLocator::file_reference_section())
                .expect("section present");
            let patched = empty.insert(range.end, &entry);

            let begin = patched.as_str().find("/* Begin").expect("begin marker");
            let end = patched.as_str().find("/* End").expect("end marker");
            let between = &patched.as_str()[begin..end];
            assert!(between.contains("/* Foo.swift */"));
            // marker line plus the single new entry line
            assert_eq!(between.lines().count(), 2);

            // a second run sees the marker and skips
            assert!(patched.entry_exists("Foo.swift"));
        }

        it "appends a phase member after the final existing entry" {
            let locator = doc
                .sources_phase("AtlasWidgetExtension")
                .expect("target present");
            let range = doc.locate(&locator).expect("phase present");
            let id = ObjectId::generate();
            let member = PbxEntry::PhaseMember {
                build_id: &id,
                name: "Clock.swift",
            }
            .render();
            let patched = doc.insert(range.end, &member);

            let phase_start = patched
                .as_str()
                .find("6B93F7D2E84A16C50FB29E61 /* Sources */")
                .expect("phase present");
            let tail = &patched.as_str()[phase_start..];
            let widget_at = tail.find("WidgetBundle.swift in Sources").expect("old member");
            let clock_at = tail.find("Clock.swift in Sources").expect("new member");
            assert!(clock_at > widget_at);
        }
    }
}
