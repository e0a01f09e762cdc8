use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::clock_time::ClockTime;
use crate::error::CoreError;

/// One contiguous working interval within a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimeSlot {
    pub id: Uuid,
    #[ts(type = "string")]
    pub start_time: ClockTime,
    #[ts(type = "string")]
    pub end_time: ClockTime,
    /// Minutes between `start_time` and `end_time`.
    pub duration: u16,
}

impl TimeSlot {
    /// Create a slot with a fresh id.
    pub fn new(start_time: ClockTime, end_time: ClockTime) -> Result<Self, CoreError> {
        Self::with_id(Uuid::new_v4(), start_time, end_time)
    }

    pub fn with_id(
        id: Uuid,
        start_time: ClockTime,
        end_time: ClockTime,
    ) -> Result<Self, CoreError> {
        if start_time >= end_time {
            return Err(CoreError::InvalidTimeSlot {
                start: start_time.to_string(),
                end: end_time.to_string(),
                reason: "start must be before end on the same day".to_string(),
            });
        }

        Ok(Self {
            id,
            start_time,
            end_time,
            duration: end_time.minutes_since_midnight() - start_time.minutes_since_midnight(),
        })
    }

    /// Check a slot that came from outside (JSON input, storage) against its
    /// own endpoints.
    pub fn validate(&self) -> Result<(), CoreError> {
        let expected = Self::with_id(self.id, self.start_time, self.end_time)?;
        if expected.duration != self.duration {
            return Err(CoreError::InvalidTimeSlot {
                start: self.start_time.to_string(),
                end: self.end_time.to_string(),
                reason: format!(
                    "duration {} does not match the interval ({} minutes)",
                    self.duration, expected.duration
                ),
            });
        }
        Ok(())
    }

    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.start_time, self.end_time)
    }
}

/// Validate a set of slots for one shift: each slot well-formed, sorted by
/// start time, and no two slots overlapping.
pub fn normalize_slots(slots: &[TimeSlot]) -> Result<Vec<TimeSlot>, CoreError> {
    for slot in slots {
        slot.validate()?;
    }

    let mut sorted = slots.to_vec();
    sorted.sort_by_key(|s| (s.start_time, s.end_time));

    for pair in sorted.windows(2) {
        if pair[0].overlaps(&pair[1]) {
            return Err(CoreError::OverlappingTimeSlots {
                first: pair[0].label(),
                second: pair[1].label(),
            });
        }
    }

    Ok(sorted)
}

/// Total worked minutes across a set of slots, computed from the endpoints.
pub fn total_minutes(slots: &[TimeSlot]) -> u32 {
    slots
        .iter()
        .map(|s| {
            u32::from(s.end_time.minutes_since_midnight())
                .saturating_sub(u32::from(s.start_time.minutes_since_midnight()))
        })
        .sum()
}
