//! HMAC-SHA-256 signatures.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::security::{SigningKeys, SigningSecret, encode_url_safe};

type HmacSha256 = Hmac<Sha256>;

/// The MAC could not be keyed with the configured secret.
#[derive(Debug, Error)]
#[error("signing secret rejected by HMAC")]
pub struct SigningError;

/// Sign `data` with `secret`, returning the URL-safe encoded MAC.
pub fn sign(data: &str, secret: &SigningSecret) -> Result<String, SigningError> {
    mac(data, secret).map(encode_url_safe)
}

/// Check `signature` against the MAC of `data` under `secret` in constant time.
///
/// A secret that cannot key the MAC matches nothing.
#[must_use]
pub fn verify(data: &str, signature: &str, secret: &SigningSecret) -> bool {
    sign(data, secret)
        .is_ok_and(|expected| expected.as_bytes().ct_eq(signature.as_bytes()).into())
}

/// Check `signature` against every verifying secret in `keys`.
///
/// All secrets are always tried so the timing does not reveal which one matched.
#[must_use]
pub fn verify_any(data: &str, signature: &str, keys: &SigningKeys) -> bool {
    keys.verifying()
        .fold(false, |matched, secret| verify(data, signature, secret) | matched)
}

fn mac(data: &str, secret: &SigningSecret) -> Result<[u8; 32], SigningError> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .map_err(|_invalid_length| SigningError)?;

    mac.update(data.as_bytes());

    Ok(mac.finalize().into_bytes().into())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn secret() -> SigningSecret {
        SigningSecret::from("test-secret")
    }

    #[test]
    fn signature_is_deterministic_and_verifies() -> TestResult {
        let signature = sign("payload", &secret())?;

        assert_eq!(signature, sign("payload", &secret())?);
        assert!(verify("payload", &signature, &secret()));

        Ok(())
    }

    #[test]
    fn signature_is_unpadded_sha256_length() -> TestResult {
        // 32 bytes -> 43 base64 characters without padding
        assert_eq!(sign("payload", &secret())?.len(), 43);

        Ok(())
    }

    #[test]
    fn secrets_longer_than_the_block_are_keyed_not_zeroed() -> TestResult {
        let long = SigningSecret::new(vec![7_u8; 200]);
        let zero_key = SigningSecret::new(vec![0_u8; 64]);

        let signature = sign("payload", &long)?;

        assert_ne!(signature, sign("payload", &zero_key)?);
        assert!(verify("payload", &signature, &long));
        assert!(!verify("payload", &signature, &zero_key));

        Ok(())
    }

    #[test]
    fn verify_rejects_other_data() -> TestResult {
        let signature = sign("payload", &secret())?;

        assert!(!verify("payload2", &signature, &secret()));

        Ok(())
    }

    #[test]
    fn verify_rejects_other_secret() -> TestResult {
        let signature = sign("payload", &secret())?;

        assert!(!verify("payload", &signature, &SigningSecret::from("other")));

        Ok(())
    }

    #[test]
    fn verify_rejects_truncated_and_empty_signatures() -> TestResult {
        let signature = sign("payload", &secret())?;
        let truncated = signature.get(..signature.len() - 1).unwrap_or_default();

        assert!(!verify("payload", truncated, &secret()));
        assert!(!verify("payload", "", &secret()));

        Ok(())
    }

    #[test]
    fn verify_any_accepts_previous_secret() -> TestResult {
        let old = SigningSecret::from("old");
        let signature = sign("payload", &old)?;

        let rotated = SigningKeys::with_previous(SigningSecret::from("new"), Some(old));

        assert!(verify_any("payload", &signature, &rotated));
        assert!(!verify_any(
            "payload",
            &signature,
            &SigningKeys::new(SigningSecret::from("new"))
        ));

        Ok(())
    }
}
