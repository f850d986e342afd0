pub mod auth;
pub mod response;
pub mod validate_params;

pub use auth::Principal;
pub use response::Confirmation;
pub use validate_params::{integer_param, positive_param, JsonBody, RequiredParams};
