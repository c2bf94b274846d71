//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    auth::{
        AuthServiceError, OatPurpose, SptPurpose, TokenService, hash_password, verify_password,
    },
    domain::users::{
        UsersService, UsersServiceError,
        records::{NewUser, UserRecord, UserUuid},
    },
};

/// A freshly started session.
#[derive(Clone)]
pub struct IssuedSession {
    pub user: UserUuid,

    /// Wire-encoded access token; shown to the client once.
    pub token: String,
}

impl std::fmt::Debug for IssuedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedSession")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

/// Sign-up details as submitted by a new user.
#[derive(Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// A newly created user, already signed in.
#[derive(Clone)]
pub struct RegisteredSession {
    pub user: UserRecord,

    /// Wire-encoded access token; shown to the client once.
    pub token: String,
}

impl std::fmt::Debug for RegisteredSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredSession")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct TokenAuthService {
    tokens: Arc<dyn TokenService>,
    users: Arc<dyn UsersService>,
}

impl std::fmt::Debug for TokenAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthService").finish_non_exhaustive()
    }
}

impl TokenAuthService {
    #[must_use]
    pub fn new(tokens: Arc<dyn TokenService>, users: Arc<dyn UsersService>) -> Self {
        Self { tokens, users }
    }
}

fn parse_subject(subject: &str) -> Result<UserUuid, AuthServiceError> {
    // A cache entry that is not a user id is treated like a missing one.
    subject.parse().map_err(|error| {
        debug!("credential subject is not a user id: {error}");

        AuthServiceError::InvalidToken
    })
}

#[async_trait]
impl AuthService for TokenAuthService {
    async fn register(
        &self,
        registration: Registration,
    ) -> Result<RegisteredSession, AuthServiceError> {
        let password_hash = hash_password(&registration.password)?;

        let user = self
            .users
            .create_user(NewUser {
                uuid: UserUuid::new(),
                name: registration.name,
                email: registration.email,
                password_hash,
            })
            .await?;

        // Mail delivery happens out of band; operators can reissue from the CLI.
        self.issue_email_verification(user.uuid).await?;

        let token = self.start_session(user.uuid).await?;

        info!(user = %user.uuid, "user registered");

        Ok(RegisteredSession { user, token })
    }

    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError> {
        let credentials = self.users.find_credentials(email).await?;

        if !verify_password(password, &credentials.password_hash)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token = self.start_session(credentials.uuid).await?;

        info!(user = %credentials.uuid, "session started");

        Ok(IssuedSession {
            user: credentials.uuid,
            token,
        })
    }

    async fn start_session(&self, user: UserUuid) -> Result<String, AuthServiceError> {
        let purpose = OatPurpose::Access;

        self.tokens
            .generate_oat(purpose, &user.to_string(), purpose.ttl())
            .await
            .map_err(Into::into)
    }

    async fn authenticate(&self, token: &str) -> Result<UserUuid, AuthServiceError> {
        let subject = self.tokens.verify_oat(OatPurpose::Access, token).await?;

        parse_subject(&subject)
    }

    async fn end_session(&self, token: &str) -> Result<(), AuthServiceError> {
        self.tokens
            .revoke_oat(OatPurpose::Access, token)
            .await
            .map_err(Into::into)
    }

    async fn issue_email_verification(&self, user: UserUuid) -> Result<String, AuthServiceError> {
        let purpose = SptPurpose::EmailVerification;

        self.tokens
            .generate_spt(purpose, &user.to_string(), purpose.ttl())
            .await
            .map_err(Into::into)
    }

    async fn verify_email(&self, token: &str) -> Result<UserUuid, AuthServiceError> {
        let purpose = SptPurpose::EmailVerification;

        let subject = self.tokens.verify_spt(purpose, token).await?;
        let user = parse_subject(&subject)?;

        // The token stays redeemable until the flag is stored.
        self.users
            .mark_email_verified(user)
            .await
            .map_err(|error| match error {
                UsersServiceError::NotFound => AuthServiceError::InvalidToken,
                error => error.into(),
            })?;

        self.tokens.revoke_spt(purpose, &subject).await?;

        info!(%user, "email verified");

        Ok(user)
    }
}

#[automock]
#[async_trait]
/// Session lifecycle and single-purpose verification flows.
pub trait AuthService: Send + Sync {
    /// Create a user, queue their email verification and sign them in.
    async fn register(
        &self,
        registration: Registration,
    ) -> Result<RegisteredSession, AuthServiceError>;

    /// Check a password and start a session for its owner.
    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError>;

    /// Issue an access token for `user`.
    async fn start_session(&self, user: UserUuid) -> Result<String, AuthServiceError>;

    /// Resolve the user behind a live access token.
    async fn authenticate(&self, token: &str) -> Result<UserUuid, AuthServiceError>;

    /// Revoke an access token.
    async fn end_session(&self, token: &str) -> Result<(), AuthServiceError>;

    /// Issue a single-use email verification token for `user`.
    async fn issue_email_verification(&self, user: UserUuid) -> Result<String, AuthServiceError>;

    /// Mark the token's user as verified, then consume the token.
    async fn verify_email(&self, token: &str) -> Result<UserUuid, AuthServiceError>;
}
