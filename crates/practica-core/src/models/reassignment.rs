use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Audit entry written for every reassignment. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReassignmentRecord {
    pub id: Uuid,
    /// The shift the slots were taken from.
    pub shift_id: Uuid,
    /// The shift created to hold the moved slots. Only set for partial
    /// reassignments; a full reassignment keeps the same shift.
    pub new_shift_id: Option<Uuid>,
    pub from_professional_id: Uuid,
    pub to_professional_id: Uuid,
    pub reason: String,
    pub is_partial: bool,
    pub slot_ids: Vec<Uuid>,
    pub date: jiff::civil::Date,
    pub created_at: jiff::Timestamp,
}

impl ReassignmentRecord {
    /// True if this record touches the given shift, either as the source or
    /// as the shift created by a partial move.
    pub fn involves(&self, shift_id: Uuid) -> bool {
        self.shift_id == shift_id || self.new_shift_id == Some(shift_id)
    }
}
