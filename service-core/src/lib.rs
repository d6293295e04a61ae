//! Shared HTTP plumbing for the g-access services: configuration, the error
//! envelope, request middleware and tracing setup.

pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod utils;
