//! Authentication: credential issuance, verification and revocation.

mod errors;
mod password;
mod purpose;
mod service;
mod token;

pub use errors::*;
pub use password::*;
pub use purpose::*;
pub use service::*;
pub use token::*;
