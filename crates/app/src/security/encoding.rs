//! URL-safe base64 transport encoding.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use thiserror::Error;

/// Transport-level decode failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// Input is not canonical unpadded URL-safe base64.
    #[error("malformed token encoding")]
    Malformed,

    /// Decoded bytes are not valid UTF-8.
    #[error("token is not valid utf-8")]
    NotUtf8,
}

/// Encode `value` as unpadded URL-safe base64.
#[must_use]
pub fn encode_url_safe(value: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(value)
}

/// Decode unpadded URL-safe base64 into raw bytes.
pub fn decode_url_safe_bytes(encoded: &str) -> Result<Vec<u8>, EncodingError> {
    URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|_decode| EncodingError::Malformed)
}

/// Decode unpadded URL-safe base64 into a string.
pub fn decode_url_safe(encoded: &str) -> Result<String, EncodingError> {
    String::from_utf8(decode_url_safe_bytes(encoded)?).map_err(|_utf8| EncodingError::NotUtf8)
}
