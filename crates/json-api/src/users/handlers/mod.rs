//! User Handlers

pub(crate) mod create;
