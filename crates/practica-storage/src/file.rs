use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use uuid::Uuid;

use practica_core::models::professional::Professional;
use practica_core::models::reassignment::ReassignmentRecord;
use practica_core::models::shift::Shift;

use crate::error::StorageError;
use crate::snapshot::RosterSnapshot;
use crate::store::RosterStore;

/// The whole roster kept in one JSON file on local disk.
///
/// Every mutation rewrites the file (temp file + rename) before the in-memory
/// copy is updated, so a failed write leaves both unchanged.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<RosterSnapshot>,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let snapshot = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let snapshot: RosterSnapshot = serde_json::from_slice(&bytes)?;
                tracing::debug!(
                    path = %path.display(),
                    shifts = snapshot.shifts.len(),
                    "roster loaded from disk"
                );
                snapshot
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no roster file yet, starting empty");
                RosterSnapshot::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            state: Mutex::new(snapshot),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self, snapshot: &RosterSnapshot) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(snapshot)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &json).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!(path = %self.path.display(), "roster flushed to disk");
        Ok(())
    }

    /// Apply `change` to a copy of the roster, persist it, then commit it.
    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut RosterSnapshot) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let out = change(&mut next)?;
        self.flush(&next).await?;
        *state = next;
        Ok(out)
    }
}

impl RosterStore for JsonFileStore {
    async fn list_professionals(&self) -> Result<Vec<Professional>, StorageError> {
        Ok(self.state.lock().await.professionals.clone())
    }

    async fn get_professional(&self, id: Uuid) -> Result<Professional, StorageError> {
        self.state.lock().await.professional(id).cloned()
    }

    async fn put_professional(&self, professional: &Professional) -> Result<(), StorageError> {
        self.mutate(|s| {
            s.upsert_professional(professional);
            Ok(())
        })
        .await
    }

    async fn list_shifts(&self) -> Result<Vec<Shift>, StorageError> {
        Ok(self.state.lock().await.shifts.clone())
    }

    async fn get_shift(&self, id: Uuid) -> Result<Shift, StorageError> {
        self.state.lock().await.shift(id).cloned()
    }

    async fn insert_shift(&self, shift: &Shift) -> Result<(), StorageError> {
        self.mutate(|s| s.insert_shift(shift)).await
    }

    async fn update_shift(&self, shift: &Shift) -> Result<Shift, StorageError> {
        self.mutate(|s| s.update_shift(shift)).await
    }

    async fn append_reassignment(&self, record: &ReassignmentRecord) -> Result<(), StorageError> {
        self.mutate(|s| {
            s.reassignments.push(record.clone());
            Ok(())
        })
        .await
    }

    async fn list_reassignments(&self) -> Result<Vec<ReassignmentRecord>, StorageError> {
        Ok(self.state.lock().await.reassignments.clone())
    }
}
