//! Tenant memberships: which users hold which role in which restaurant.

pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::MembershipsServiceError;
pub use service::*;
