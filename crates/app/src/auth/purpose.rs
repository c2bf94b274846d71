//! Token purposes and their cache namespaces.

use std::time::Duration;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// What an Opaque Access Token grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OatPurpose {
    /// A signed-in session.
    Access,
}

impl OatPurpose {
    /// Cache namespace for tokens of this purpose.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Access => "access_token",
        }
    }

    /// Server-side lifetime of a freshly issued token.
    #[must_use]
    pub const fn ttl(self) -> Duration {
        match self {
            Self::Access => Duration::from_secs(7 * DAY.as_secs()),
        }
    }
}

/// What a Signed Purpose Token may be exchanged for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SptPurpose {
    /// Confirming ownership of an email address.
    EmailVerification,
}

impl SptPurpose {
    /// Cache namespace for tokens of this purpose.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::EmailVerification => "email_verification",
        }
    }

    /// How long the purpose stays redeemable.
    #[must_use]
    pub const fn ttl(self) -> Duration {
        match self {
            Self::EmailVerification => DAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_never_collide_across_token_kinds() {
        assert_ne!(
            OatPurpose::Access.prefix(),
            SptPurpose::EmailVerification.prefix()
        );
    }

    #[test]
    fn lifetimes() {
        assert_eq!(OatPurpose::Access.ttl(), Duration::from_secs(604_800));
        assert_eq!(SptPurpose::EmailVerification.ttl(), Duration::from_secs(86_400));
    }
}
