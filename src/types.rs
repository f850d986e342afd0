/// Shared types used across the codebase

/// Primary key type for every trackr table (PostgreSQL `SERIAL`)
pub type DbId = i32;
