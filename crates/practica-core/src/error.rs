use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid clock time '{0}' (expected HH:MM)")]
    InvalidClockTime(String),

    #[error("invalid time slot {start}-{end}: {reason}")]
    InvalidTimeSlot {
        start: String,
        end: String,
        reason: String,
    },

    #[error("time slots overlap: {first} and {second}")]
    OverlappingTimeSlots { first: String, second: String },

    #[error("calendar month {month} of year {year} is out of range (months are 0-11)")]
    InvalidMonth { month: i8, year: i16 },

    #[error("invalid weekday {0} (expected 0=Sunday..6=Saturday)")]
    InvalidWeekday(i8),
}
