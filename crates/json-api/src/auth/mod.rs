//! Authentication

mod errors;
pub(crate) mod guest;
mod identity;
pub(crate) mod middleware;

pub(crate) use errors::*;
pub(crate) use identity::*;
