use clap::Parser;
use std::process::ExitCode;

mod args;
mod cache;
mod cmd;
mod output;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = args::Cli::parse();

    if cli.verbose {
        common::init_logging_with_default("debug");
    } else {
        common::init_logging();
    }

    let raw = cli.command.is_raw();
    tracing::debug!(command = ?cli.command, "Starting");

    match cmd::dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            cmd::report(&err, raw);
            ExitCode::FAILURE
        }
    }
}
