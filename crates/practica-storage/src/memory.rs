use tokio::sync::RwLock;
use uuid::Uuid;

use practica_core::models::professional::Professional;
use practica_core::models::reassignment::ReassignmentRecord;
use practica_core::models::shift::Shift;

use crate::error::StorageError;
use crate::snapshot::RosterSnapshot;
use crate::store::RosterStore;

/// Process-local store. Lost on exit; used for demos and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<RosterSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RosterStore for MemoryStore {
    async fn list_professionals(&self) -> Result<Vec<Professional>, StorageError> {
        Ok(self.inner.read().await.professionals.clone())
    }

    async fn get_professional(&self, id: Uuid) -> Result<Professional, StorageError> {
        self.inner.read().await.professional(id).cloned()
    }

    async fn put_professional(&self, professional: &Professional) -> Result<(), StorageError> {
        self.inner.write().await.upsert_professional(professional);
        Ok(())
    }

    async fn list_shifts(&self) -> Result<Vec<Shift>, StorageError> {
        Ok(self.inner.read().await.shifts.clone())
    }

    async fn get_shift(&self, id: Uuid) -> Result<Shift, StorageError> {
        self.inner.read().await.shift(id).cloned()
    }

    async fn insert_shift(&self, shift: &Shift) -> Result<(), StorageError> {
        self.inner.write().await.insert_shift(shift)
    }

    async fn update_shift(&self, shift: &Shift) -> Result<Shift, StorageError> {
        self.inner.write().await.update_shift(shift)
    }

    async fn append_reassignment(&self, record: &ReassignmentRecord) -> Result<(), StorageError> {
        self.inner.write().await.reassignments.push(record.clone());
        Ok(())
    }

    async fn list_reassignments(&self) -> Result<Vec<ReassignmentRecord>, StorageError> {
        Ok(self.inner.read().await.reassignments.clone())
    }
}
