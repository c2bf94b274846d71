//! Tenant Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Tenant UUID
pub type TenantUuid = TypedUuid<TenantRecord>;

/// Tenant Record
#[derive(Debug, Clone, PartialEq)]
pub struct TenantRecord {
    /// Unique tenant identifier.
    pub uuid: TenantUuid,

    /// Restaurant display name.
    pub name: String,

    /// URL-friendly restaurant handle.
    pub alias: String,

    /// Tenant creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,
}
