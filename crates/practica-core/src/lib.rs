//! practica-core
//!
//! Pure rostering domain types, the monthly calendar builder, and storage key
//! conventions. No I/O.

pub mod calendar;
pub mod error;
pub mod models;
pub mod store_keys;
