//! Session Handlers

pub(crate) mod create;
pub(crate) mod current;
pub(crate) mod delete;
