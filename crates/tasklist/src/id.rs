//! Identifier generation for new records.
//!
//! Ids are UUIDv4 rendered as 32 lowercase hex characters with no hyphens,
//! giving 122 random bits per id.

use uuid::Uuid;

pub fn new_identifier() -> String {
    Uuid::new_v4().simple().to_string()
}
