//! Stack server entry point.
//!
//! Loads configuration, initializes logging, and dispatches the selected
//! subcommand (`serve` by default).

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};
use uuid::Uuid;

use stack_auth::JwtEncoder;
use stack_core::config::AppConfig;
use stack_core::error::AppError;
use stack_database::DatabasePool;

/// Stack document service
#[derive(Debug, Parser)]
#[command(name = "stack-server", version, about, long_about = None)]
struct Cli {
    /// Configuration overlay to load from `config/{env}.toml`
    #[arg(short, long, env = "STACK_ENV", default_value = "development")]
    env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
    /// Mint an access token for local testing
    Token {
        /// User ID to place in the `sub` claim
        #[arg(long)]
        user: Uuid,
        /// Optional display name
        #[arg(long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = execute(cli.command.unwrap_or(Commands::Serve), config).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn execute(command: Commands, config: AppConfig) -> Result<(), AppError> {
    match command {
        Commands::Serve => stack_api::run_server(config).await,
        Commands::Migrate => {
            let db = DatabasePool::connect_and_migrate(&config.database).await?;
            db.close().await;
            tracing::info!("Database migrations complete");
            Ok(())
        }
        Commands::Token { user, name } => {
            let encoder = JwtEncoder::new(&config.auth);
            let (token, expires_at) = encoder.generate_access_token(user, name.as_deref())?;
            println!("{token}");
            tracing::info!(user_id = %user, %expires_at, "Access token issued");
            Ok(())
        }
    }
}

/// Initialize tracing. `RUST_LOG` takes precedence over `logging.level`.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
