mod cli;
mod commands;
mod export;
mod infra;
mod shared;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let Cli { command } = Cli::parse();

    match command {
        Commands::Fetch(args) => commands::fetch::run(&args).await?,
        Commands::Config(command) => command.run()?,
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "gramexport",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Log to stderr; level controlled via RUST_LOG (default: warn).
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
