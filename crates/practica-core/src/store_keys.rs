//! Object key conventions.
//!
//! Pure string functions shared by every key-value backend. These define the
//! canonical layout of roster records in a bucket.

use uuid::Uuid;

pub const SHIFTS_PREFIX: &str = "shifts/";

pub const PROFESSIONALS_PREFIX: &str = "professionals/";

pub const REASSIGNMENTS_PREFIX: &str = "reassignments/";

pub fn shift(id: Uuid) -> String {
    format!("{SHIFTS_PREFIX}{id}.json")
}

pub fn professional(id: Uuid) -> String {
    format!("{PROFESSIONALS_PREFIX}{id}.json")
}

pub fn reassignment(id: Uuid) -> String {
    format!("{REASSIGNMENTS_PREFIX}{id}.json")
}
