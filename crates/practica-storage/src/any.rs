use uuid::Uuid;

use practica_core::models::professional::Professional;
use practica_core::models::reassignment::ReassignmentRecord;
use practica_core::models::shift::Shift;

use crate::error::StorageError;
use crate::file::JsonFileStore;
use crate::memory::MemoryStore;
use crate::s3::S3Store;
use crate::store::RosterStore;

/// A store whose backend is chosen at runtime from configuration.
pub enum AnyStore {
    Memory(MemoryStore),
    File(JsonFileStore),
    S3(S3Store),
}

impl AnyStore {
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::File(_) => "file",
            Self::S3(_) => "s3",
        }
    }
}

impl RosterStore for AnyStore {
    async fn list_professionals(&self) -> Result<Vec<Professional>, StorageError> {
        match self {
            Self::Memory(s) => s.list_professionals().await,
            Self::File(s) => s.list_professionals().await,
            Self::S3(s) => s.list_professionals().await,
        }
    }

    async fn get_professional(&self, id: Uuid) -> Result<Professional, StorageError> {
        match self {
            Self::Memory(s) => s.get_professional(id).await,
            Self::File(s) => s.get_professional(id).await,
            Self::S3(s) => s.get_professional(id).await,
        }
    }

    async fn put_professional(&self, professional: &Professional) -> Result<(), StorageError> {
        match self {
            Self::Memory(s) => s.put_professional(professional).await,
            Self::File(s) => s.put_professional(professional).await,
            Self::S3(s) => s.put_professional(professional).await,
        }
    }

    async fn list_shifts(&self) -> Result<Vec<Shift>, StorageError> {
        match self {
            Self::Memory(s) => s.list_shifts().await,
            Self::File(s) => s.list_shifts().await,
            Self::S3(s) => s.list_shifts().await,
        }
    }

    async fn get_shift(&self, id: Uuid) -> Result<Shift, StorageError> {
        match self {
            Self::Memory(s) => s.get_shift(id).await,
            Self::File(s) => s.get_shift(id).await,
            Self::S3(s) => s.get_shift(id).await,
        }
    }

    async fn insert_shift(&self, shift: &Shift) -> Result<(), StorageError> {
        match self {
            Self::Memory(s) => s.insert_shift(shift).await,
            Self::File(s) => s.insert_shift(shift).await,
            Self::S3(s) => s.insert_shift(shift).await,
        }
    }

    async fn update_shift(&self, shift: &Shift) -> Result<Shift, StorageError> {
        match self {
            Self::Memory(s) => s.update_shift(shift).await,
            Self::File(s) => s.update_shift(shift).await,
            Self::S3(s) => s.update_shift(shift).await,
        }
    }

    async fn append_reassignment(&self, record: &ReassignmentRecord) -> Result<(), StorageError> {
        match self {
            Self::Memory(s) => s.append_reassignment(record).await,
            Self::File(s) => s.append_reassignment(record).await,
            Self::S3(s) => s.append_reassignment(record).await,
        }
    }

    async fn list_reassignments(&self) -> Result<Vec<ReassignmentRecord>, StorageError> {
        match self {
            Self::Memory(s) => s.list_reassignments().await,
            Self::File(s) => s.list_reassignments().await,
            Self::S3(s) => s.list_reassignments().await,
        }
    }
}
