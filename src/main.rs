use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use orchard::server::Server;

/// Listen address for the emulator. Offset from PostgreSQL's 5432 so a real
/// server can run alongside.
const LISTEN_ADDR: &str = "127.0.0.1:25432";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let listener = TcpListener::bind(LISTEN_ADDR).await?;
    tracing::info!(addr = LISTEN_ADDR, "listening");

    Server::new(listener).serve().await?;
    Ok(())
}
