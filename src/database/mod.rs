pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{Fixture, FixtureError, MemoryRepository};
pub use postgres::PgRoutineActivityRepository;
pub use repository::RoutineActivityRepository;
