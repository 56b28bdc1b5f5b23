use roster_server::{Config, Server, ServerState, init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Set up environment (dotenv, logging)
    dotenv::dotenv().ok();
    init_logger();

    tracing::info!("Roster server starting...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize server state (store, auth, seed data)
    let state = ServerState::initialize(&config).await?;

    // 4. Start the HTTP server
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
