use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::DbId;

/// An activity attached to a routine with a target repetition count and
/// duration (seconds). Owned transitively through its routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct RoutineActivity {
    pub id: DbId,
    pub routine_id: DbId,
    pub activity_id: DbId,
    pub count: i32,
    pub duration: i32,
}

/// Insert payload. `creator_id` is the acting principal; the repository only
/// attaches the activity when the routine belongs to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoutineActivity {
    pub creator_id: DbId,
    pub routine_id: DbId,
    pub activity_id: DbId,
    pub count: i32,
    pub duration: i32,
}

/// Partial update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoutineActivityPatch {
    pub count: Option<i32>,
    pub duration: Option<i32>,
}

impl RoutineActivityPatch {
    pub fn apply_to(&self, record: &mut RoutineActivity) {
        if let Some(count) = self.count {
            record.count = count;
        }
        if let Some(duration) = self.duration {
            record.duration = duration;
        }
    }
}
