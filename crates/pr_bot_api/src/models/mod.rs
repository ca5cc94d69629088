//! HTTP request and response models
//!
//! These types are distinct from domain types and exist only in the HTTP layer.

pub mod request;
pub mod response;

pub use request::CreatePullRequestRequest;
pub use response::{CreatePullRequestResponse, HealthCheckResponse};
