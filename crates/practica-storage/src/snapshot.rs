use serde::{Deserialize, Serialize};
use uuid::Uuid;

use practica_core::models::professional::Professional;
use practica_core::models::reassignment::ReassignmentRecord;
use practica_core::models::shift::Shift;
use practica_core::store_keys;

use crate::error::StorageError;

/// The whole roster as one document. Backs the in-memory and file stores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterSnapshot {
    #[serde(default)]
    pub professionals: Vec<Professional>,
    #[serde(default)]
    pub shifts: Vec<Shift>,
    #[serde(default)]
    pub reassignments: Vec<ReassignmentRecord>,
}

impl RosterSnapshot {
    pub fn professional(&self, id: Uuid) -> Result<&Professional, StorageError> {
        self.professionals
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| StorageError::NotFound {
                key: store_keys::professional(id),
            })
    }

    pub fn upsert_professional(&mut self, professional: &Professional) {
        match self.professionals.iter_mut().find(|p| p.id == professional.id) {
            Some(existing) => *existing = professional.clone(),
            None => self.professionals.push(professional.clone()),
        }
    }

    pub fn shift(&self, id: Uuid) -> Result<&Shift, StorageError> {
        self.shifts
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| StorageError::NotFound {
                key: store_keys::shift(id),
            })
    }

    pub fn insert_shift(&mut self, shift: &Shift) -> Result<(), StorageError> {
        if self.shifts.iter().any(|s| s.id == shift.id) {
            return Err(StorageError::AlreadyExists {
                key: store_keys::shift(shift.id),
            });
        }
        self.shifts.push(shift.clone());
        Ok(())
    }

    pub fn update_shift(&mut self, shift: &Shift) -> Result<Shift, StorageError> {
        let key = store_keys::shift(shift.id);
        let existing = self
            .shifts
            .iter_mut()
            .find(|s| s.id == shift.id)
            .ok_or_else(|| StorageError::NotFound { key: key.clone() })?;

        if existing.version != shift.version {
            return Err(StorageError::VersionConflict {
                key,
                expected: shift.version,
                actual: existing.version,
            });
        }

        let mut stored = shift.clone();
        stored.version += 1;
        *existing = stored.clone();
        Ok(stored)
    }
}
