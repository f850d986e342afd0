use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A workout routine. `creator_id` is the single source of truth for who
/// may edit the routine and every activity attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub id: DbId,
    pub creator_id: DbId,
    #[serde(default)]
    pub is_public: bool,
    pub name: String,
    #[serde(default)]
    pub goal: String,
}

impl Routine {
    pub fn new(id: DbId, creator_id: DbId, name: impl Into<String>) -> Self {
        Self {
            id,
            creator_id,
            is_public: false,
            name: name.into(),
            goal: String::new(),
        }
    }
}
