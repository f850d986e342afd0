use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Catalog entry a routine can reference (e.g. "push ups")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Activity {
    pub fn new(id: DbId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
        }
    }
}
