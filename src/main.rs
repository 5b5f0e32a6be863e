#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL and friends.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = fibra_api::config::config();
    tracing::info!("Starting fibra-api in {:?} mode", config.environment);

    if let Err(e) = fibra_api::server::run(None).await {
        tracing::error!("server error: {:#}", e);
        std::process::exit(1);
    }
}
