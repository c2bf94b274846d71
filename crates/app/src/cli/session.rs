use clap::{Args, Subcommand};
use maitre_app::auth::{OatPurpose, TokenService, TokenServiceError};

use super::args::TokenArgs;

#[derive(Debug, Args)]
pub(crate) struct SessionCommand {
    #[command(subcommand)]
    command: SessionSubcommand,
}

#[derive(Debug, Subcommand)]
enum SessionSubcommand {
    /// End a session by its signed access token
    Revoke(RevokeSessionArgs),
}

#[derive(Debug, Args)]
struct RevokeSessionArgs {
    #[command(flatten)]
    tokens: TokenArgs,

    /// Signed access token, as sent by the client
    #[arg(long, env = "MAITRE_ACCESS_TOKEN", hide_env_values = true)]
    token: String,
}

pub(crate) async fn run(command: SessionCommand) -> Result<(), String> {
    match command.command {
        SessionSubcommand::Revoke(args) => revoke(args).await,
    }
}

async fn revoke(args: RevokeSessionArgs) -> Result<(), String> {
    let tokens = args.tokens.token_service().await?;

    match tokens.revoke_oat(OatPurpose::Access, args.token.trim()).await {
        Ok(()) => {
            println!("session revoked");

            Ok(())
        }
        Err(TokenServiceError::InvalidToken) => {
            Err("token is malformed or was signed with a different secret".to_string())
        }
        Err(error) => Err(format!("failed to revoke session: {error}")),
    }
}
