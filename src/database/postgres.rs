use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{NewRoutineActivity, RoutineActivity, RoutineActivityPatch};
use crate::database::repository::RoutineActivityRepository;
use crate::types::DbId;

/// PostgreSQL error code for foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

const COLUMNS: &str = r#"id, "routineId", "activityId", count, duration"#;

/// Routine activities stored in the `routine_activities` table, owned through
/// `routines."creatorId"`
#[derive(Clone)]
pub struct PgRoutineActivityRepository {
    pool: PgPool,
}

impl PgRoutineActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoutineActivityRepository for PgRoutineActivityRepository {
    async fn list_all(&self) -> Result<Vec<RoutineActivity>, DatabaseError> {
        let sql = format!("SELECT {COLUMNS} FROM routine_activities ORDER BY id");
        let rows = sqlx::query_as::<_, RoutineActivity>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create(
        &self,
        new: NewRoutineActivity,
    ) -> Result<Option<RoutineActivity>, DatabaseError> {
        // The SELECT only yields a row when the routine exists and belongs to
        // the creator; duplicates fall out through ON CONFLICT.
        let sql = format!(
            r#"
            INSERT INTO routine_activities ("routineId", "activityId", count, duration)
            SELECT r.id, $2, $3, $4
            FROM routines r
            WHERE r.id = $1 AND r."creatorId" = $5
            ON CONFLICT ("routineId", "activityId") DO NOTHING
            RETURNING {COLUMNS}
            "#
        );

        let result = sqlx::query_as::<_, RoutineActivity>(&sql)
            .bind(new.routine_id)
            .bind(new.activity_id)
            .bind(new.count)
            .bind(new.duration)
            .bind(new.creator_id)
            .fetch_optional(&self.pool)
            .await;

        match result {
            Ok(row) => Ok(row),
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) =>
            {
                tracing::warn!(
                    "Rejected routine activity for routine {} / activity {}: {}",
                    new.routine_id,
                    new.activity_id,
                    db_err
                );
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<RoutineActivity>, DatabaseError> {
        let sql = format!("SELECT {COLUMNS} FROM routine_activities WHERE id = $1");
        let row = sqlx::query_as::<_, RoutineActivity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        id: DbId,
        patch: RoutineActivityPatch,
    ) -> Result<Option<RoutineActivity>, DatabaseError> {
        let sql = format!(
            r#"
            UPDATE routine_activities
            SET count = COALESCE($2, count),
                duration = COALESCE($3, duration)
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, RoutineActivity>(&sql)
            .bind(id)
            .bind(patch.count)
            .bind(patch.duration)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn destroy(&self, id: DbId) -> Result<Option<RoutineActivity>, DatabaseError> {
        let sql = format!("DELETE FROM routine_activities WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, RoutineActivity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn owner_of(&self, id: DbId) -> Result<Option<DbId>, DatabaseError> {
        let owner = sqlx::query_scalar::<_, DbId>(
            r#"
            SELECT r."creatorId"
            FROM routine_activities ra
            JOIN routines r ON r.id = ra."routineId"
            WHERE ra.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(owner)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
