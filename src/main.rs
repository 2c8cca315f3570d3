// Allow common clippy pedantic lints
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]

//! GitLab Variable Provider CLI
//!
//! Command-line host for managing project CI/CD variables

use clap::Parser;
use gitlab_variable_provider::cli::{Cli, Runner};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging; stdout carries command output
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
