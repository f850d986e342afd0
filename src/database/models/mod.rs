pub mod activity;
pub mod routine;
pub mod routine_activity;

pub use activity::Activity;
pub use routine::Routine;
pub use routine_activity::{NewRoutineActivity, RoutineActivity, RoutineActivityPatch};
