pub mod routine_activities;
pub mod server;
pub mod token;
