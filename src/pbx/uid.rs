use std::fmt;

use uuid::Uuid;

/// Length of a manifest object identifier.
const ID_LEN: usize = 24;

/// A manifest object identifier: 24 uppercase hex characters.
///
/// Xcode accepts any unique 24-character token here; these are derived
/// from a random UUID with the hyphens stripped, uppercased, and truncated.
/// Uniqueness within a run is all that matters — collisions across runs
/// are as likely as two UUIDs colliding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn generate() -> Self {
        let mut hex = Uuid::new_v4().simple().to_string().to_uppercase();
        hex.truncate(ID_LEN);
        ObjectId(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
