use clap::{Args, Subcommand};
use maitre_app::{
    auth::{SptPurpose, TokenService},
    domain::users::records::UserUuid,
};
use uuid::Uuid;

use super::args::TokenArgs;

#[derive(Debug, Args)]
pub(crate) struct VerificationCommand {
    #[command(subcommand)]
    command: VerificationSubcommand,
}

#[derive(Debug, Subcommand)]
enum VerificationSubcommand {
    /// Issue an email verification token for a user
    Issue(IssueVerificationArgs),

    /// Withdraw any outstanding email verification token for a user
    Revoke(RevokeVerificationArgs),
}

#[derive(Debug, Args)]
struct IssueVerificationArgs {
    #[command(flatten)]
    tokens: TokenArgs,

    /// User the token verifies
    #[arg(long)]
    user_uuid: Uuid,
}

#[derive(Debug, Args)]
struct RevokeVerificationArgs {
    #[command(flatten)]
    tokens: TokenArgs,

    /// User whose token should stop working
    #[arg(long)]
    user_uuid: Uuid,
}

pub(crate) async fn run(command: VerificationCommand) -> Result<(), String> {
    match command.command {
        VerificationSubcommand::Issue(args) => issue(args).await,
        VerificationSubcommand::Revoke(args) => revoke(args).await,
    }
}

async fn issue(args: IssueVerificationArgs) -> Result<(), String> {
    let tokens = args.tokens.token_service().await?;
    let user = UserUuid::from_uuid(args.user_uuid);
    let purpose = SptPurpose::EmailVerification;

    let token = tokens
        .generate_spt(purpose, &user.to_string(), purpose.ttl())
        .await
        .map_err(|error| format!("failed to issue verification token: {error}"))?;

    println!("user_uuid: {user}");
    println!("expires_in_hours: {}", purpose.ttl().as_secs() / 3_600);
    println!("verification_path: /email-verifications?token={token}");

    Ok(())
}

async fn revoke(args: RevokeVerificationArgs) -> Result<(), String> {
    let tokens = args.tokens.token_service().await?;
    let user = UserUuid::from_uuid(args.user_uuid);

    tokens
        .revoke_spt(SptPurpose::EmailVerification, &user.to_string())
        .await
        .map_err(|error| format!("failed to revoke verification token: {error}"))?;

    println!("verification for {user} revoked");

    Ok(())
}
