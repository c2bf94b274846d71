//! Deployment Environment Config

use clap::Args;

/// Where the server is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum AppEnv {
    Production,
    Staging,

    /// Local development over plain HTTP.
    Dev,
}

impl AppEnv {
    /// Cookies carry the `Secure` attribute everywhere except local development.
    #[must_use]
    pub fn secure_cookies(self) -> bool {
        !matches!(self, Self::Dev)
    }
}

/// Deployment environment settings.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Deployment environment (production, staging, dev)
    #[arg(long, env = "APP_ENV", value_enum, default_value_t = AppEnv::Production)]
    pub app_env: AppEnv,
}
