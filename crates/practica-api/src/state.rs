use std::sync::Arc;

use practica_roster::ShiftService;
use practica_storage::any::AnyStore;
use practica_storage::file::JsonFileStore;
use practica_storage::memory::MemoryStore;
use practica_storage::s3::S3Store;

use crate::config::BackendConfig;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ShiftService<AnyStore>>,
}

impl AppState {
    pub fn new(store: AnyStore) -> Self {
        Self {
            service: Arc::new(ShiftService::new(store)),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(AnyStore::Memory(MemoryStore::new()))
    }
}

/// Open the configured backend.
pub async fn open_store(backend: &BackendConfig) -> eyre::Result<AnyStore> {
    let store = match backend {
        BackendConfig::Memory => AnyStore::Memory(MemoryStore::new()),
        BackendConfig::File { path } => AnyStore::File(JsonFileStore::open(path).await?),
        BackendConfig::S3 { bucket, region } => {
            let client = practica_storage::client::build_client(region.as_deref()).await;
            AnyStore::S3(S3Store::new(client, bucket.clone()))
        }
    };
    tracing::info!(backend = store.backend_name(), "roster store opened");
    Ok(store)
}
