//! Signing primitive: HMAC-SHA-256 signatures and URL-safe token encoding.

mod encoding;
mod secret;
mod signing;

pub use encoding::*;
pub use secret::*;
pub use signing::*;
