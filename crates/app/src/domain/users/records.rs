//! User Records

use crate::uuids::TypedUuid;

/// Marker for user identifiers.
#[derive(Debug)]
pub struct User;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// What login needs to know about a user.
#[derive(Clone)]
pub struct UserCredentials {
    pub uuid: UserUuid,

    /// Argon2 PHC string.
    pub password_hash: String,
}

impl std::fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredentials")
            .field("uuid", &self.uuid)
            .finish_non_exhaustive()
    }
}

/// A registered user as shown back to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
}

/// A user about to be inserted. The password is already hashed.
#[derive(Clone)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,

    /// Argon2 PHC string.
    pub password_hash: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("uuid", &self.uuid)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
