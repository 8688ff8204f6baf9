use clap::{Parser, Subcommand};

use crate::{commands, error::CliError, system::SystemEnvironment};
use commands::*;

#[derive(Debug, Parser)]
#[command(name = "graphcool")]
#[command(about = "Command line interface for graphcool projects")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export the data of a project
    Export(ExportArgs),

    /// Show version information
    Version,
}

impl Cli {
    pub async fn run(&self) -> Result<(), CliError> {
        match &self.command {
            Some(Commands::Export(args)) => self.handle_export(args).await,
            Some(Commands::Version) => self.handle_version().await,
            None => {
                println!("graphcool CLI - manage graphcool projects");
                println!("Run 'graphcool --help' for usage information.");
                Ok(())
            }
        }
    }

    async fn handle_export(&self, args: &ExportArgs) -> Result<(), CliError> {
        let env = SystemEnvironment::from_process()?;
        export_command(args, &env).await
    }

    async fn handle_version(&self) -> Result<(), CliError> {
        println!("graphcool CLI version: {}", env!("CARGO_PKG_VERSION"));
        println!("Description: {}", env!("CARGO_PKG_DESCRIPTION"));
        Ok(())
    }
}
