pub mod bearer;

pub use bearer::require_bearer_token;
