use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Activity, NewRoutineActivity, Routine, RoutineActivity, RoutineActivityPatch,
};
use crate::database::repository::RoutineActivityRepository;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Failed to read fixture: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid fixture JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Routine activity id {0} leaves no room for new rows")]
    IdSpaceExhausted(DbId),
}

/// Seed data for the memory backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default)]
    pub routines: Vec<Routine>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub routine_activities: Vec<RoutineActivity>,
}

impl Fixture {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[derive(Debug)]
struct Tables {
    routines: BTreeMap<DbId, Routine>,
    activities: BTreeMap<DbId, Activity>,
    routine_activities: BTreeMap<DbId, RoutineActivity>,
    /// `None` once `DbId::MAX` has been handed out
    next_id: Option<DbId>,
}

/// Process-local store with the same semantics as the PostgreSQL repository.
/// Used for local runs without a database and throughout the test suite.
#[derive(Debug)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    /// Seed the store. New rows are numbered after the highest fixture id.
    pub fn from_fixture(fixture: Fixture) -> Result<Self, FixtureError> {
        let highest = fixture
            .routine_activities
            .iter()
            .map(|ra| ra.id)
            .max()
            .unwrap_or(0);
        let next_id = highest
            .checked_add(1)
            .ok_or(FixtureError::IdSpaceExhausted(highest))?;

        let tables = Tables {
            routines: fixture.routines.into_iter().map(|r| (r.id, r)).collect(),
            activities: fixture.activities.into_iter().map(|a| (a.id, a)).collect(),
            routine_activities: fixture
                .routine_activities
                .into_iter()
                .map(|ra| (ra.id, ra))
                .collect(),
            next_id: Some(next_id),
        };

        Ok(Self {
            tables: RwLock::new(tables),
        })
    }
}

#[async_trait]
impl RoutineActivityRepository for MemoryRepository {
    async fn list_all(&self) -> Result<Vec<RoutineActivity>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.routine_activities.values().cloned().collect())
    }

    async fn create(
        &self,
        new: NewRoutineActivity,
    ) -> Result<Option<RoutineActivity>, DatabaseError> {
        let mut tables = self.tables.write().await;

        let owned = tables
            .routines
            .get(&new.routine_id)
            .is_some_and(|r| r.creator_id == new.creator_id);
        let duplicate = tables
            .routine_activities
            .values()
            .any(|ra| ra.routine_id == new.routine_id && ra.activity_id == new.activity_id);

        if !owned || !tables.activities.contains_key(&new.activity_id) || duplicate {
            return Ok(None);
        }

        let id = tables
            .next_id
            .ok_or(DatabaseError::IdSpaceExhausted("routine_activities"))?;
        tables.next_id = id.checked_add(1);

        let record = RoutineActivity {
            id,
            routine_id: new.routine_id,
            activity_id: new.activity_id,
            count: new.count,
            duration: new.duration,
        };
        tables.routine_activities.insert(id, record.clone());
        Ok(Some(record))
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<RoutineActivity>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.routine_activities.get(&id).cloned())
    }

    async fn update(
        &self,
        id: DbId,
        patch: RoutineActivityPatch,
    ) -> Result<Option<RoutineActivity>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.routine_activities.get_mut(&id).map(|record| {
            patch.apply_to(record);
            record.clone()
        }))
    }

    async fn destroy(&self, id: DbId) -> Result<Option<RoutineActivity>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.routine_activities.remove(&id))
    }

    async fn owner_of(&self, id: DbId) -> Result<Option<DbId>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .routine_activities
            .get(&id)
            .and_then(|ra| tables.routines.get(&ra.routine_id))
            .map(|routine| routine.creator_id))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Fixture {
        Fixture {
            routines: vec![Routine::new(1, 5, "Leg day"), Routine::new(2, 9, "Cardio")],
            activities: vec![Activity::new(2, "squats"), Activity::new(3, "running")],
            routine_activities: vec![RoutineActivity {
                id: 7,
                routine_id: 2,
                activity_id: 3,
                count: 1,
                duration: 600,
            }],
        }
    }

    fn new_for(creator_id: DbId, routine_id: DbId, activity_id: DbId) -> NewRoutineActivity {
        NewRoutineActivity {
            creator_id,
            routine_id,
            activity_id,
            count: 10,
            duration: 30,
        }
    }

    #[tokio::test]
    async fn create_assigns_ids_after_fixture_rows() {
        let repo = MemoryRepository::from_fixture(fixture()).unwrap();
        let created = repo.create(new_for(5, 1, 2)).await.unwrap().unwrap();
        assert_eq!(created.id, 8);
        assert_eq!(created.routine_id, 1);
        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn create_declines_unknown_references_duplicates_and_foreign_routines() {
        let repo = MemoryRepository::from_fixture(fixture()).unwrap();
        // routine missing
        assert!(repo.create(new_for(5, 42, 2)).await.unwrap().is_none());
        // activity missing
        assert!(repo.create(new_for(5, 1, 42)).await.unwrap().is_none());
        // routine 2 belongs to 9
        assert!(repo.create(new_for(5, 2, 2)).await.unwrap().is_none());
        // pair (2, 3) already attached
        assert!(repo.create(new_for(9, 2, 3)).await.unwrap().is_none());
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn owner_is_resolved_through_the_routine() {
        let repo = MemoryRepository::from_fixture(fixture()).unwrap();
        assert_eq!(repo.owner_of(7).await.unwrap(), Some(9));
        assert_eq!(repo.owner_of(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn destroy_returns_the_removed_row() {
        let repo = MemoryRepository::from_fixture(fixture()).unwrap();
        let removed = repo.destroy(7).await.unwrap().unwrap();
        assert_eq!(removed.id, 7);
        assert!(repo.get_by_id(7).await.unwrap().is_none());
        assert!(repo.destroy(7).await.unwrap().is_none());
    }

    #[test]
    fn fixture_at_the_top_of_the_id_range_is_rejected() {
        let mut seed = fixture();
        seed.routine_activities[0].id = DbId::MAX;
        assert!(matches!(
            MemoryRepository::from_fixture(seed),
            Err(FixtureError::IdSpaceExhausted(DbId::MAX))
        ));
    }

    #[tokio::test]
    async fn create_hands_out_the_last_id_then_errors() {
        let mut seed = fixture();
        seed.routine_activities[0].id = DbId::MAX - 1;
        let repo = MemoryRepository::from_fixture(seed).unwrap();

        let last = repo.create(new_for(5, 1, 2)).await.unwrap().unwrap();
        assert_eq!(last.id, DbId::MAX);

        let exhausted = repo.create(new_for(9, 2, 2)).await;
        assert!(matches!(exhausted, Err(DatabaseError::IdSpaceExhausted(_))));
        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }

    #[test]
    fn fixture_parses_camel_case_json() {
        let json = r#"{
            "routines": [{"id": 1, "creatorId": 5, "name": "Leg day"}],
            "activities": [{"id": 2, "name": "squats"}],
            "routineActivities": [
                {"id": 3, "routineId": 1, "activityId": 2, "count": 10, "duration": 30}
            ]
        }"#;
        let fixture: Fixture = serde_json::from_str(json).unwrap();
        assert_eq!(fixture.routines[0].creator_id, 5);
        assert!(!fixture.routines[0].is_public);
        assert_eq!(fixture.routine_activities[0].activity_id, 2);
    }
}
