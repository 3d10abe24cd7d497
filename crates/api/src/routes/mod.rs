//! HTTP route handlers.

pub mod auth;
pub mod backup;
pub mod discounts;
pub mod health;
pub mod info;
pub mod news;
pub mod rules;
pub mod sections;
pub mod store;
pub mod users;

use crate::error::ApiError;

/// Fallback for methods a route does not serve.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
