use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use pairline::server::{Config, serve};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pairline")]
#[command(about = "One-to-one matchmaking and WebRTC signaling relay")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the signaling server.
    Serve {
        /// Overrides PAIRLINE_BIND_ADDRESS.
        #[arg(short, long)]
        bind: Option<String>,

        /// Overrides PAIRLINE_LOG_LEVEL. RUST_LOG still wins when set.
        #[arg(long)]
        log_level: Option<String>,

        /// Overrides PAIRLINE_ALLOWED_ORIGINS. Repeat for several origins.
        #[arg(long = "allowed-origin")]
        allowed_origins: Vec<String>,
    },

    /// Print the effective configuration and exit.
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Serve {
            bind,
            log_level,
            allowed_origins,
        } => {
            if let Some(bind) = bind {
                config.bind_address = bind;
            }
            if let Some(log_level) = log_level {
                config.log_level = log_level;
            }
            if !allowed_origins.is_empty() {
                config.allowed_origins = allowed_origins;
            }

            init_tracing(&config.log_level)?;

            println!("{}", "🚀 Starting pairline...".green().bold());
            println!("   🔌 Listening on {}", config.bind_address);

            serve(config).await?;
        }
        Commands::CheckConfig => {
            println!("{}", "✅ Configuration is valid".green().bold());
            println!("{:#?}", config);
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level)
            .with_context(|| format!("Invalid log level '{log_level}'"))?,
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}
