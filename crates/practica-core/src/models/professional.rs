use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A clinician who can own shifts. Shifts reference professionals by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Professional {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub is_active: bool,
}

impl Professional {
    pub fn new(name: impl Into<String>, specialty: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            specialty: specialty.into(),
            is_active: true,
        }
    }
}
