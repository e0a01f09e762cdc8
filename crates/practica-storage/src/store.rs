use std::future::Future;

use uuid::Uuid;

use practica_core::models::professional::Professional;
use practica_core::models::reassignment::ReassignmentRecord;
use practica_core::models::shift::Shift;

use crate::error::StorageError;

/// Persistence for the roster: professionals, shifts, and the reassignment
/// audit log.
///
/// Each call touches one record; there is no transaction spanning several.
/// Shift updates are guarded by [`Shift::version`]: `update_shift` succeeds
/// only when the stored version equals the version of the value passed in,
/// and stores it with the version incremented.
pub trait RosterStore: Send + Sync {
    fn list_professionals(
        &self,
    ) -> impl Future<Output = Result<Vec<Professional>, StorageError>> + Send;

    fn get_professional(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Professional, StorageError>> + Send;

    /// Insert or replace a professional.
    fn put_professional(
        &self,
        professional: &Professional,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    fn list_shifts(&self) -> impl Future<Output = Result<Vec<Shift>, StorageError>> + Send;

    fn get_shift(&self, id: Uuid) -> impl Future<Output = Result<Shift, StorageError>> + Send;

    /// Store a new shift. Fails with `AlreadyExists` if the id is taken.
    fn insert_shift(&self, shift: &Shift)
    -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Replace an existing shift, checking its version. Returns the shift as
    /// stored (with the bumped version).
    fn update_shift(
        &self,
        shift: &Shift,
    ) -> impl Future<Output = Result<Shift, StorageError>> + Send;

    fn append_reassignment(
        &self,
        record: &ReassignmentRecord,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    fn list_reassignments(
        &self,
    ) -> impl Future<Output = Result<Vec<ReassignmentRecord>, StorageError>> + Send;
}
