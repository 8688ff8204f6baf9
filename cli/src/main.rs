use clap::Parser;
use tracing::{debug, info};

use graphcool_cli::cli::Cli;
use graphcool_cli::error::CliError;
use graphcool_cli::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    info!("graphcool CLI starting");
    debug!("CLI arguments: {:?}", cli);

    match cli.run().await {
        Ok(_) => {
            info!("graphcool CLI completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("CLI error: {:?}", e);
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}
