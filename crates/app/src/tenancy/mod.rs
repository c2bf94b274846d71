//! Tenant scoping: which restaurant a request acts on, and with what role.

mod errors;
mod resolver;

pub use errors::TenantResolutionError;
pub use resolver::*;
