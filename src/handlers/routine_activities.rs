// Routine activity endpoints mounted at /api/routine_activities
//
// GET    /          public, every routine activity
// POST   /          attach an activity to one of the caller's routines
// PATCH  /:id       change count and/or duration (owner only)
// DELETE /:id       detach (owner only)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{Map, Value};

use crate::app::AppState;
use crate::auth::can_edit;
use crate::database::models::{NewRoutineActivity, RoutineActivity, RoutineActivityPatch};
use crate::error::{ApiError, ApiResult};
use crate::middleware::{
    integer_param, positive_param, Confirmation, JsonBody, Principal, RequiredParams,
};
use crate::types::DbId;

const CREATE_PARAMS: RequiredParams =
    RequiredParams::all(&["routineId", "activityId", "duration", "count"]);
const UPDATE_PARAMS: RequiredParams = RequiredParams::at_least_one(&["count", "duration"]);

const CANNOT_EDIT: &str = "You cannot edit this routine_activity!";

/// GET /api/routine_activities
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<RoutineActivity>>> {
    let routine_activities = state.repo.list_all().await?;
    Ok(Json(routine_activities))
}

/// POST /api/routine_activities
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    JsonBody(body): JsonBody,
) -> ApiResult<(StatusCode, Json<RoutineActivity>)> {
    CREATE_PARAMS.check(&body)?;

    let new = NewRoutineActivity {
        creator_id: principal.id,
        routine_id: required(&body, "routineId", integer_param)?,
        activity_id: required(&body, "activityId", integer_param)?,
        count: required(&body, "count", positive_param)?,
        duration: required(&body, "duration", positive_param)?,
    };
    tracing::debug!(
        "User {} adding activity {} to routine {}",
        principal.id,
        new.activity_id,
        new.routine_id
    );

    match state.repo.create(new).await {
        Ok(Some(created)) => Ok((StatusCode::CREATED, Json(created))),
        Ok(None) => Err(ApiError::FailedToAddActivity),
        Err(e) => {
            tracing::error!("Failed to add activity to routine: {}", e);
            Err(e.into())
        }
    }
}

/// PATCH /api/routine_activities/:id
pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Path(raw_id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Json<RoutineActivity>> {
    UPDATE_PARAMS.check(&body)?;

    let id = parse_id(&raw_id)?;
    let patch = RoutineActivityPatch {
        count: positive_param(&body, "count")?,
        duration: positive_param(&body, "duration")?,
    };

    if state.repo.get_by_id(id).await?.is_none() {
        return Err(not_found(id));
    }

    if !can_edit(state.repo.as_ref(), id, principal.id).await? {
        return Err(ApiError::unauthorized(CANNOT_EDIT));
    }

    // Row may have been deleted since the ownership check
    let updated = state.repo.update(id, patch).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(updated))
}

/// DELETE /api/routine_activities/:id
///
/// No existence check: a missing id has no owner, so it is refused as
/// `Unauthorized` like any other record the caller does not own.
pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Confirmation<RoutineActivity>>> {
    let id = parse_id(&raw_id)?;

    if !can_edit(state.repo.as_ref(), id, principal.id).await? {
        return Err(ApiError::unauthorized(CANNOT_EDIT));
    }

    let deleted = state.repo.destroy(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(Confirmation::success(deleted)))
}

fn not_found(id: DbId) -> ApiError {
    ApiError::not_found(format!("No routine_activity found by ID {}", id))
}

fn parse_id(raw: &str) -> Result<DbId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_parameter(format!("Invalid routine_activity ID {}", raw)))
}

/// Read a field the required-parameter check already guaranteed is present
fn required(
    body: &Map<String, Value>,
    name: &'static str,
    read: fn(&Map<String, Value>, &str) -> Result<Option<i32>, ApiError>,
) -> Result<i32, ApiError> {
    read(body, name)?.ok_or_else(|| {
        ApiError::missing_parameters(
            format!("Missing required parameters: {}", name),
            vec![name.to_string()],
        )
    })
}
