use uuid::Uuid;

use practica_core::models::professional::Professional;
use practica_core::models::reassignment::ReassignmentRecord;
use practica_core::models::shift::Shift;
use practica_core::store_keys;

use crate::error::StorageError;
use crate::objects::Bucket;
use crate::state;
use crate::store::RosterStore;

/// One JSON object per record in an S3 bucket.
///
/// Shift updates read the current object, compare versions, and write back
/// with `If-Match` on the ETag that was read, so concurrent writers from other
/// processes are detected as well.
#[derive(Clone)]
pub struct S3Store {
    bucket: Bucket,
}

impl S3Store {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            bucket: Bucket::new(client, bucket),
        }
    }

    pub fn bucket(&self) -> &str {
        self.bucket.name()
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        match self.bucket.get_object(key).await {
            Ok(_) => Ok(true),
            Err(StorageError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl RosterStore for S3Store {
    async fn list_professionals(&self) -> Result<Vec<Professional>, StorageError> {
        state::load_all_json(&self.bucket, store_keys::PROFESSIONALS_PREFIX).await
    }

    async fn get_professional(&self, id: Uuid) -> Result<Professional, StorageError> {
        let (professional, _etag) =
            state::load_json(&self.bucket, &store_keys::professional(id)).await?;
        Ok(professional)
    }

    async fn put_professional(&self, professional: &Professional) -> Result<(), StorageError> {
        state::save_json(
            &self.bucket,
            &store_keys::professional(professional.id),
            professional,
        )
        .await?;
        Ok(())
    }

    async fn list_shifts(&self) -> Result<Vec<Shift>, StorageError> {
        state::load_all_json(&self.bucket, store_keys::SHIFTS_PREFIX).await
    }

    async fn get_shift(&self, id: Uuid) -> Result<Shift, StorageError> {
        let (shift, _etag) = state::load_json(&self.bucket, &store_keys::shift(id)).await?;
        Ok(shift)
    }

    async fn insert_shift(&self, shift: &Shift) -> Result<(), StorageError> {
        let key = store_keys::shift(shift.id);
        if self.exists(&key).await? {
            return Err(StorageError::AlreadyExists { key });
        }
        state::save_json(&self.bucket, &key, shift).await?;
        tracing::debug!(bucket = %self.bucket.name(), key = %key, "shift stored");
        Ok(())
    }

    async fn update_shift(&self, shift: &Shift) -> Result<Shift, StorageError> {
        let key = store_keys::shift(shift.id);
        let (current, etag): (Shift, String) = state::load_json(&self.bucket, &key).await?;

        if current.version != shift.version {
            return Err(StorageError::VersionConflict {
                key,
                expected: shift.version,
                actual: current.version,
            });
        }

        let mut stored = shift.clone();
        stored.version += 1;
        state::save_json_if_match(&self.bucket, &key, &stored, &etag).await?;

        tracing::debug!(
            bucket = %self.bucket.name(),
            key = %key,
            version = stored.version,
            "shift updated"
        );
        Ok(stored)
    }

    async fn append_reassignment(&self, record: &ReassignmentRecord) -> Result<(), StorageError> {
        state::save_json(&self.bucket, &store_keys::reassignment(record.id), record).await?;
        Ok(())
    }

    async fn list_reassignments(&self) -> Result<Vec<ReassignmentRecord>, StorageError> {
        state::load_all_json(&self.bucket, store_keys::REASSIGNMENTS_PREFIX).await
    }
}
