//! Token Secrets Config

use clap::Args;

use maitre_app::security::{SigningKeys, SigningSecret};

/// Token signing secrets. Previous secrets are only used for verification.
#[derive(Args)]
pub struct SecurityConfig {
    /// Secret for signing access tokens
    #[arg(long, env = "OAT_SECRET", hide_env_values = true, value_parser = non_empty)]
    pub oat_secret: String,

    /// Previous access token secret, still accepted during rotation
    #[arg(long, env = "OAT_PREVIOUS_SECRET", hide_env_values = true)]
    pub oat_previous_secret: Option<String>,

    /// Secret for signing purpose tokens
    #[arg(long, env = "SPT_SECRET", hide_env_values = true, value_parser = non_empty)]
    pub spt_secret: String,

    /// Previous purpose token secret, still accepted during rotation
    #[arg(long, env = "SPT_PREVIOUS_SECRET", hide_env_values = true)]
    pub spt_previous_secret: Option<String>,
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig").finish_non_exhaustive()
    }
}

impl SecurityConfig {
    #[must_use]
    pub fn oat_keys(&self) -> SigningKeys {
        keys(&self.oat_secret, self.oat_previous_secret.as_deref())
    }

    #[must_use]
    pub fn spt_keys(&self) -> SigningKeys {
        keys(&self.spt_secret, self.spt_previous_secret.as_deref())
    }
}

fn non_empty(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err("secret must not be empty".to_string());
    }

    Ok(value.to_string())
}

fn keys(current: &str, previous: Option<&str>) -> SigningKeys {
    SigningKeys::with_previous(
        SigningSecret::from(current),
        previous.filter(|secret| !secret.is_empty()).map(SigningSecret::from),
    )
}
