pub mod calendar;
pub mod health;
pub mod professionals;
pub mod reassignments;
pub mod shifts;
