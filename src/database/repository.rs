use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewRoutineActivity, RoutineActivity, RoutineActivityPatch};
use crate::types::DbId;

/// Storage operations behind the routine activity endpoints.
///
/// Each call is its own unit of work; nothing here spans calls, so an
/// ownership check followed by a mutation is two independent round trips.
/// `Ok(None)` means "no such row" (or, for `create`, "declined").
#[async_trait]
pub trait RoutineActivityRepository: Send + Sync {
    /// Every routine activity, ordered by id
    async fn list_all(&self) -> Result<Vec<RoutineActivity>, DatabaseError>;

    /// Attach an activity to a routine. Returns `None` when the routine or
    /// activity does not exist, the routine is not owned by
    /// `new.creator_id`, or the pair is already attached.
    async fn create(
        &self,
        new: NewRoutineActivity,
    ) -> Result<Option<RoutineActivity>, DatabaseError>;

    async fn get_by_id(&self, id: DbId) -> Result<Option<RoutineActivity>, DatabaseError>;

    /// Apply only the fields present in `patch`
    async fn update(
        &self,
        id: DbId,
        patch: RoutineActivityPatch,
    ) -> Result<Option<RoutineActivity>, DatabaseError>;

    /// Remove the row and hand back what was deleted
    async fn destroy(&self, id: DbId) -> Result<Option<RoutineActivity>, DatabaseError>;

    /// `creatorId` of the routine the routine activity belongs to
    async fn owner_of(&self, id: DbId) -> Result<Option<DbId>, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
