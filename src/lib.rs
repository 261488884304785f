//! Wires widget extensions into Xcode application projects.
//!
//! The project manifest (`project.pbxproj`) is a semi-structured text
//! document; [`pbx`] patches it by locating sections and splicing in new
//! entries, skipping anything that is already wired. [`entitlements`]
//! creates the App Group grant files both targets need to share data.
//! [`wire`] drives a full run from a [`models::WirePlan`].

pub mod entitlements;
pub mod models;
pub mod pbx;
pub mod wire;
