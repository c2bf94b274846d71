//! Signing secrets.

use std::fmt;

use zeroize::Zeroize;

/// Server-side HMAC key material.
#[derive(Clone)]
pub struct SigningSecret {
    bytes: Vec<u8>,
}

impl SigningSecret {
    /// Wrap raw key material.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Borrow the key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<&str> for SigningSecret {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(**redacted**)")
    }
}

impl Drop for SigningSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// The secrets for one token kind.
///
/// New signatures always use `current`. A `previous` secret is only accepted
/// during verification, which lets a deployment rotate keys without logging
/// every session out at once.
#[derive(Debug, Clone)]
pub struct SigningKeys {
    current: SigningSecret,
    previous: Option<SigningSecret>,
}

impl SigningKeys {
    /// Keys with a single active secret.
    #[must_use]
    pub fn new(current: SigningSecret) -> Self {
        Self {
            current,
            previous: None,
        }
    }

    /// Keys that still accept signatures made with a retiring secret.
    #[must_use]
    pub fn with_previous(current: SigningSecret, previous: Option<SigningSecret>) -> Self {
        Self { current, previous }
    }

    /// Secret used to sign.
    #[must_use]
    pub fn current(&self) -> &SigningSecret {
        &self.current
    }

    /// Every secret a signature is checked against, newest first.
    pub fn verifying(&self) -> impl Iterator<Item = &SigningSecret> {
        std::iter::once(&self.current).chain(self.previous.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let secret = SigningSecret::from("hunter2");

        assert!(!format!("{secret:?}").contains("hunter2"));
        assert!(!format!("{:?}", SigningKeys::new(secret)).contains("hunter2"));
    }

    #[test]
    fn verifying_lists_current_then_previous() {
        let keys = SigningKeys::with_previous(
            SigningSecret::from("new"),
            Some(SigningSecret::from("old")),
        );

        let secrets: Vec<&[u8]> = keys.verifying().map(SigningSecret::as_bytes).collect();

        assert_eq!(secrets, vec![b"new".as_slice(), b"old".as_slice()]);
    }
}
