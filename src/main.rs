use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vat_register::cli;

#[derive(Parser)]
#[command(name = "vat-register")]
#[command(about = "Replay a VAT register command script")]
enum Cli {
    /// Run a command script against an empty register
    #[command(name = "run")]
    Run {
        input: PathBuf,
        /// Log filter for stderr, e.g. `debug` or `vat_register=trace`
        #[arg(long)]
        log_level: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 2 && !args[1].starts_with('-') && args[1] != "run" {
        // Bare script argument, no logging for clean stdout
        cli::run(PathBuf::from(&args[1])).await?;
    } else {
        match Cli::parse() {
            Cli::Run { input, log_level } => {
                let filter = match log_level {
                    Some(level) => EnvFilter::try_new(level)?,
                    None => EnvFilter::from_default_env(),
                };

                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_env_filter(filter)
                    .init();

                cli::run(input).await?;
            }
        }
    }

    Ok(())
}
