mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "timetable", version, about = "Weekly timetable generation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a timetable (or several ranked options) from a request document
    Solve(commands::solve::SolveArgs),
    /// Check a request for structural problems without solving it
    Validate(commands::validate::ValidateArgs),
    /// Print a JSON schema for the request or the outcome document
    Schema(commands::schema::SchemaArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    // stdout carries the result document; logs go to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    match Cli::parse().command {
        Command::Solve(args) => commands::solve::handle(args),
        Command::Validate(args) => commands::validate::handle(args),
        Command::Schema(args) => commands::schema::handle(args),
    }
}
