//! Tenant scoping

mod errors;
pub(crate) mod middleware;

pub(crate) use errors::*;
