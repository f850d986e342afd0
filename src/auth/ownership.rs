use crate::database::{DatabaseError, RoutineActivityRepository};
use crate::types::DbId;

/// Whether `principal_id` may modify the routine activity `routine_activity_id`.
///
/// Ownership is never stored on the routine activity; it is resolved through
/// the parent routine's `creatorId`. A routine activity that does not exist is
/// never editable. Called on every update/delete, nothing is cached.
pub async fn can_edit(
    repo: &dyn RoutineActivityRepository,
    routine_activity_id: DbId,
    principal_id: DbId,
) -> Result<bool, DatabaseError> {
    let owner = repo.owner_of(routine_activity_id).await?;
    let allowed = owner == Some(principal_id);

    if allowed {
        tracing::debug!(
            "User {} may edit routine_activity {}",
            principal_id,
            routine_activity_id
        );
    } else {
        tracing::warn!(
            "User {} denied edit on routine_activity {} (owner: {:?})",
            principal_id,
            routine_activity_id,
            owner
        );
    }

    Ok(allowed)
}
