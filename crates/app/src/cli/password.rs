use clap::{Args, Subcommand};
use maitre_app::auth::hash_password;

#[derive(Debug, Args)]
pub(crate) struct PasswordCommand {
    #[command(subcommand)]
    command: PasswordSubcommand,
}

#[derive(Debug, Subcommand)]
enum PasswordSubcommand {
    /// Print an Argon2 hash suitable for the users table
    Hash(HashPasswordArgs),
}

#[derive(Args)]
struct HashPasswordArgs {
    /// Plain-text password
    #[arg(long, env = "MAITRE_PASSWORD", hide_env_values = true)]
    password: String,
}

impl std::fmt::Debug for HashPasswordArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashPasswordArgs").finish_non_exhaustive()
    }
}

pub(crate) fn run(command: PasswordCommand) -> Result<(), String> {
    match command.command {
        PasswordSubcommand::Hash(args) => {
            if args.password.is_empty() {
                return Err("password cannot be empty".to_string());
            }

            let hash = hash_password(&args.password)
                .map_err(|error| format!("failed to hash password: {error}"))?;

            println!("{hash}");

            Ok(())
        }
    }
}
