pub mod calendar;
pub mod clock_time;
pub mod professional;
pub mod reassignment;
pub mod shift;
pub mod time_slot;
