//! Configuration and reporting types.
//!
//! A [`WirePlan`] is the explicit input to a run: the manifest to patch,
//! the files to wire with their destinations, and the entitlement files to
//! create. A [`WireReport`] is the output: per-file outcomes where
//! "already present" is a normal result, never an error.

mod entry;
mod plan;
mod report;

pub use entry::*;
pub use plan::*;
pub use report::*;
