//! practica-roster
//!
//! Shift rostering: the shift store service, the reassignment engine, and the
//! demo data generator, all over a [`practica_storage::store::RosterStore`].

pub mod error;
pub mod reassign;
pub mod sample;
pub mod service;

pub use error::RosterError;
pub use service::ShiftService;
