use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::calendar::CalendarMonth;
use super::clock_time::ClockTime;
use super::professional::Professional;
use super::time_slot::{self, TimeSlot};

/// Lifecycle status of a shift. Serialized with the Spanish labels the front
/// end displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ShiftStatus {
    #[serde(rename = "Asignado")]
    Assigned,
    #[serde(rename = "Disponible")]
    Available,
    #[serde(rename = "Incapacidad")]
    SickLeave,
    #[serde(rename = "Vacaciones")]
    Vacation,
    #[serde(rename = "Reasignado")]
    Reassigned,
}

impl ShiftStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Assigned => "Asignado",
            Self::Available => "Disponible",
            Self::SickLeave => "Incapacidad",
            Self::Vacation => "Vacaciones",
            Self::Reassigned => "Reasignado",
        }
    }
}

/// One professional's time slots for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Shift {
    pub id: Uuid,
    pub professional_id: Uuid,
    /// Snapshot of the owner's name at the last write. Refreshed when the
    /// professional is renamed.
    pub professional_name: String,
    pub date: jiff::civil::Date,
    /// Sorted by start time, non-overlapping.
    pub time_slots: Vec<TimeSlot>,
    pub status: ShiftStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,

    // Reassignment lineage
    #[serde(default)]
    pub reassigned_from: Option<Uuid>,
    #[serde(default)]
    pub reassigned_to: Option<Uuid>,
    #[serde(default)]
    pub is_partial_reassignment: bool,
    #[serde(default)]
    pub original_shift_id: Option<Uuid>,

    /// Optimistic concurrency counter. Bumped by the store on every update.
    #[serde(default)]
    pub version: u64,
}

impl Shift {
    /// A freshly assigned shift for `professional` on `date`.
    pub fn assigned(
        professional: &Professional,
        date: jiff::civil::Date,
        time_slots: Vec<TimeSlot>,
        now: jiff::Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            professional_id: professional.id,
            professional_name: professional.name.clone(),
            date,
            time_slots,
            status: ShiftStatus::Assigned,
            notes: None,
            created_at: now,
            updated_at: now,
            reassigned_from: None,
            reassigned_to: None,
            is_partial_reassignment: false,
            original_shift_id: None,
            version: 0,
        }
    }

    pub fn total_minutes(&self) -> u32 {
        time_slot::total_minutes(&self.time_slots)
    }

    pub fn slot_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.time_slots.iter().map(|s| s.id)
    }

    pub fn first_start(&self) -> Option<ClockTime> {
        self.time_slots.first().map(|s| s.start_time)
    }

    pub fn has_lineage(&self) -> bool {
        self.reassigned_from.is_some()
            || self.reassigned_to.is_some()
            || self.original_shift_id.is_some()
    }

    pub fn is_in_month(&self, month: CalendarMonth) -> bool {
        month.contains(self.date)
    }
}
