//! Opaque Access Tokens and Signed Purpose Tokens.
//!
//! Wire formats:
//!
//! - OAT: `b64url(b64url(random) "." b64url(hmac(b64url(random))))`; the cache
//!   entry `<prefix>:<b64url(random)>` holds the subject and is authoritative.
//! - SPT: `b64url(subject "." b64url(hmac(subject)))`; the cache entry
//!   `<prefix>:<subject>` only gates single use.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use mockall::automock;
use rand::{RngCore, rngs::OsRng};
use tracing::debug;
use zeroize::Zeroize;

use crate::{
    auth::{OatPurpose, SptPurpose, TokenServiceError},
    cache::{CacheKey, CredentialCache},
    security::{SigningKeys, decode_url_safe, encode_url_safe, sign, verify_any},
};

/// Random bytes behind every Opaque Access Token.
pub const OAT_RANDOM_BYTES: usize = 32;

const SEPARATOR: char = '.';

#[automock]
#[async_trait]
/// Issues and checks credentials against the credential cache.
pub trait TokenService: Send + Sync {
    /// Issue a random token bound to `subject` for `ttl`.
    async fn generate_oat(
        &self,
        purpose: OatPurpose,
        subject: &str,
        ttl: Duration,
    ) -> Result<String, TokenServiceError>;

    /// Return the subject bound to a live, correctly signed token.
    async fn verify_oat(
        &self,
        purpose: OatPurpose,
        encoded: &str,
    ) -> Result<String, TokenServiceError>;

    /// Delete the cache binding of a correctly signed token. Already expired
    /// tokens revoke successfully.
    async fn revoke_oat(&self, purpose: OatPurpose, encoded: &str)
    -> Result<(), TokenServiceError>;

    /// Issue a token embedding `subject`, redeemable until `ttl` elapses or it
    /// is revoked.
    async fn generate_spt(
        &self,
        purpose: SptPurpose,
        subject: &str,
        ttl: Duration,
    ) -> Result<String, TokenServiceError>;

    /// Return the embedded subject of a correctly signed, unconsumed token.
    async fn verify_spt(
        &self,
        purpose: SptPurpose,
        encoded: &str,
    ) -> Result<String, TokenServiceError>;

    /// Consume the purpose for `subject`. Idempotent.
    async fn revoke_spt(&self, purpose: SptPurpose, subject: &str)
    -> Result<(), TokenServiceError>;
}

/// [`TokenService`] backed by a [`CredentialCache`].
#[derive(Clone)]
pub struct CacheTokenService {
    cache: Arc<dyn CredentialCache>,
    oat_keys: SigningKeys,
    spt_keys: SigningKeys,
}

impl std::fmt::Debug for CacheTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheTokenService").finish_non_exhaustive()
    }
}

impl CacheTokenService {
    /// Build a service signing access tokens with `oat_keys` and purpose
    /// tokens with `spt_keys`.
    #[must_use]
    pub fn new(cache: Arc<dyn CredentialCache>, oat_keys: SigningKeys, spt_keys: SigningKeys) -> Self {
        Self {
            cache,
            oat_keys,
            spt_keys,
        }
    }
}

/// Decode the wire value and check its signature, returning the signed payload.
fn open(encoded: &str, keys: &SigningKeys) -> Result<String, TokenServiceError> {
    let decoded = decode_url_safe(encoded).map_err(|error| {
        debug!("token rejected: {error}");

        TokenServiceError::InvalidToken
    })?;

    let mut parts = decoded.split(SEPARATOR);

    let (Some(payload), Some(signature), None) = (parts.next(), parts.next(), parts.next()) else {
        debug!("token rejected: expected exactly two parts");

        return Err(TokenServiceError::InvalidToken);
    };

    if payload.is_empty() || !verify_any(payload, signature, keys) {
        debug!("token rejected: bad signature");

        return Err(TokenServiceError::InvalidToken);
    }

    Ok(payload.to_string())
}

fn seal(payload: &str, keys: &SigningKeys) -> Result<String, TokenServiceError> {
    let signature = sign(payload, keys.current())?;

    Ok(encode_url_safe(format!("{payload}{SEPARATOR}{signature}")))
}

fn random_token() -> Result<String, TokenServiceError> {
    let mut bytes = [0_u8; OAT_RANDOM_BYTES];

    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(TokenServiceError::RandomGeneration)?;

    let token = encode_url_safe(bytes);

    bytes.zeroize();

    Ok(token)
}

#[async_trait]
impl TokenService for CacheTokenService {
    async fn generate_oat(
        &self,
        purpose: OatPurpose,
        subject: &str,
        ttl: Duration,
    ) -> Result<String, TokenServiceError> {
        let token = random_token()?;

        self.cache
            .set(&CacheKey::new(purpose.prefix(), &token), subject, ttl)
            .await?;

        seal(&token, &self.oat_keys)
    }

    async fn verify_oat(
        &self,
        purpose: OatPurpose,
        encoded: &str,
    ) -> Result<String, TokenServiceError> {
        let token = open(encoded, &self.oat_keys)?;

        let subject = self
            .cache
            .get(&CacheKey::new(purpose.prefix(), &token))
            .await?;

        Ok(subject)
    }

    async fn revoke_oat(
        &self,
        purpose: OatPurpose,
        encoded: &str,
    ) -> Result<(), TokenServiceError> {
        let token = open(encoded, &self.oat_keys)?;

        self.cache
            .delete(&CacheKey::new(purpose.prefix(), &token))
            .await?;

        Ok(())
    }

    async fn generate_spt(
        &self,
        purpose: SptPurpose,
        subject: &str,
        ttl: Duration,
    ) -> Result<String, TokenServiceError> {
        if subject.is_empty() || subject.contains(SEPARATOR) {
            return Err(TokenServiceError::InvalidSubject);
        }

        let sealed = seal(subject, &self.spt_keys)?;

        self.cache
            .set(&CacheKey::new(purpose.prefix(), subject), subject, ttl)
            .await?;

        Ok(sealed)
    }

    async fn verify_spt(
        &self,
        purpose: SptPurpose,
        encoded: &str,
    ) -> Result<String, TokenServiceError> {
        let subject = open(encoded, &self.spt_keys)?;

        let stored = self
            .cache
            .get(&CacheKey::new(purpose.prefix(), &subject))
            .await?;

        Ok(stored)
    }

    async fn revoke_spt(
        &self,
        purpose: SptPurpose,
        subject: &str,
    ) -> Result<(), TokenServiceError> {
        self.cache
            .delete(&CacheKey::new(purpose.prefix(), subject))
            .await?;

        Ok(())
    }
}
