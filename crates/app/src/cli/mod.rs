use clap::{Parser, Subcommand};

mod args;
mod password;
mod session;
mod verification;

#[derive(Debug, Parser)]
#[command(name = "maitre-app", about = "Maitre operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Password(password::PasswordCommand),
    Session(session::SessionCommand),
    Verification(verification::VerificationCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Password(command) => password::run(command),
            Commands::Session(command) => session::run(command).await,
            Commands::Verification(command) => verification::run(command).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verification_issue_requires_a_uuid() {
        let parsed = Cli::try_parse_from([
            "maitre-app",
            "verification",
            "issue",
            "--user-uuid",
            "not-a-uuid",
            "--redis-url",
            "redis://localhost",
            "--oat-secret",
            "a",
            "--spt-secret",
            "b",
        ]);

        assert!(parsed.is_err());
    }

    #[test]
    fn password_hash_parses() -> TestResult {
        let cli = Cli::try_parse_from(["maitre-app", "password", "hash", "--password", "s3cret"])?;

        assert!(matches!(cli.command, Commands::Password(_)));

        Ok(())
    }
}
