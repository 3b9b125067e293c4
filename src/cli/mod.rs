pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "admin-gateway")]
#[command(about = "Backend-for-frontend gateway for the booking admin dashboard")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the HTTP gateway (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Print the resolved configuration with secrets redacted")]
    Config,

    #[command(about = "Check that the backend API answers")]
    Ping(commands::ping::PingArgs),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = crate::config::config().clone();

    match cli.command {
        None => commands::serve::handle(commands::serve::ServeArgs::default(), config).await,
        Some(Commands::Serve(args)) => commands::serve::handle(args, config).await,
        Some(Commands::Config) => commands::config::handle(&config, output_format),
        Some(Commands::Ping(args)) => commands::ping::handle(args, config, output_format).await,
    }
}
