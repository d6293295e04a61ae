//! HTTP handlers for gaccess-service.

pub mod article;
pub mod health;
pub mod relay;

pub use health::{health_check, metrics, readiness_check};
