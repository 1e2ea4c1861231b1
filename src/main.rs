use anyhow::Result;
use clap::{Parser, Subcommand};
use folio::cli::contact::MessageArgs;

/// folio - portfolio contact relay
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Relay portfolio contact form messages by email", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a contact message and send it
    Send {
        #[command(flatten)]
        message: MessageArgs,

        /// Build the email but skip SMTP
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a contact message without sending it
    Check {
        #[command(flatten)]
        message: MessageArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = folio::Config::load(cli.config.clone())?;

    folio::observability::init_observability(
        "folio",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Send { message, dry_run } => {
            config.validate().map_err(|e| anyhow::anyhow!(e))?;
            folio::cli::contact::send(config, message, dry_run).await
        }
        Commands::Check { message } => folio::cli::contact::check(message),
    }
}
