use clap::{Parser, Subcommand};

use fibra_api::config;
use fibra_api::database::manager;
use fibra_api::services::AdminService;
use fibra_api::state::AppState;

#[derive(Parser)]
#[command(
    name = "fibra",
    version,
    about = "Operational CLI for the cabling-progress tracking API"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Bind port (overrides configuration)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Apply pending database migrations
    Migrate,
    /// Admin registry maintenance
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Activate an admin directly, bypassing the self-registration flow.
    /// This is how the first admin gets created; the HTTP endpoint requires
    /// an existing admin session.
    Add {
        email: String,
        /// External identity-provider user id
        #[arg(long)]
        user_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => fibra_api::server::run(port).await,
        Commands::Migrate => {
            let pool = manager::connect(&config::config().database)?;
            manager::run_migrations(&pool).await?;
            println!("migrations applied");
            Ok(())
        }
        Commands::Admin {
            command: AdminCommands::Add { email, user_id },
        } => {
            let state = AppState::from_config(config::config())?;
            let admin = AdminService::new(state.pool.clone(), state.identity.clone())
                .bootstrap(&user_id, &email)
                .await?;
            println!("admin #{} active for {}", admin.id, admin.email);
            Ok(())
        }
    }
}
