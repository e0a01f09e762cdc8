use thiserror::Error;
use uuid::Uuid;

use practica_core::error::CoreError;
use practica_storage::error::StorageError;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("persistence error: {0}")]
    Persistence(#[from] StorageError),

    /// Some dates were persisted before the store failed. Those shifts stay.
    #[error(
        "assignment interrupted after {} date(s) were stored: {source}",
        .persisted.len()
    )]
    PartialAssignment {
        persisted: Vec<jiff::civil::Date>,
        #[source]
        source: StorageError,
    },
}

impl RosterError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Map a store lookup failure, turning a missing record into `NotFound`.
    pub(crate) fn lookup(kind: &'static str, id: Uuid) -> impl FnOnce(StorageError) -> Self {
        move |e| {
            if e.is_not_found() {
                Self::NotFound { kind, id }
            } else {
                Self::Persistence(e)
            }
        }
    }

    /// The storage error underneath, if any.
    pub fn storage(&self) -> Option<&StorageError> {
        match self {
            Self::Persistence(e) | Self::PartialAssignment { source: e, .. } => Some(e),
            _ => None,
        }
    }
}

impl From<CoreError> for RosterError {
    fn from(e: CoreError) -> Self {
        Self::Validation(e.to_string())
    }
}
