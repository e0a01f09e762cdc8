use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::objects::Bucket;

const JSON: &str = "application/json";

/// Load a JSON record. Returns the deserialized value and its ETag.
pub async fn load_json<T: DeserializeOwned>(
    bucket: &Bucket,
    key: &str,
) -> Result<(T, String), StorageError> {
    let output = bucket.get_object(key).await?;
    let value: T = serde_json::from_slice(&output.body)?;
    Ok((value, output.etag.unwrap_or_default()))
}

/// Load every JSON record under a prefix.
pub async fn load_all_json<T: DeserializeOwned>(
    bucket: &Bucket,
    prefix: &str,
) -> Result<Vec<T>, StorageError> {
    let keys = bucket.list_keys(prefix).await?;

    let mut values = Vec::with_capacity(keys.len());
    for key in &keys {
        let (value, _etag) = load_json(bucket, key).await?;
        values.push(value);
    }
    Ok(values)
}

/// Save a JSON record. Returns the new ETag.
pub async fn save_json<T: Serialize>(
    bucket: &Bucket,
    key: &str,
    value: &T,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    bucket.put_object(key, body, JSON).await
}

/// Save a JSON record with ETag optimistic locking.
pub async fn save_json_if_match<T: Serialize>(
    bucket: &Bucket,
    key: &str,
    value: &T,
    expected_etag: &str,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    bucket
        .put_object_if_match(key, body, JSON, expected_etag)
        .await
}
