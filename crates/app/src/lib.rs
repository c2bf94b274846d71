//! Authentication, sessions and tenant scoping for the restaurant backend.

pub mod auth;
pub mod cache;
pub mod context;
pub mod database;
pub mod domain;
pub mod security;
pub mod tenancy;
pub mod uuids;
