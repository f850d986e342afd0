// handlers/mod.rs
//
// Route handlers grouped by resource. Authentication is opted into per
// handler by taking a `Principal` argument; handlers without one are public.

pub mod routine_activities;
