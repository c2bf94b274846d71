//! Maitre operator CLI

use std::process::ExitCode;

use clap::Parser;

#[expect(
    clippy::print_stdout,
    reason = "operator commands report their results on stdout"
)]
mod cli;

#[tokio::main]
pub async fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    match cli::Cli::parse().run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            #[expect(
                clippy::print_stderr,
                reason = "the CLI has no subscriber, failures go straight to stderr"
            )]
            {
                eprintln!("{error}");
            }

            ExitCode::FAILURE
        }
    }
}
