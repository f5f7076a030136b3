use anyhow::Result;
use tracing::Level;

use gridql_server::{Server, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // initialize tracing
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = ServerConfig::from_env()?;
    let server = Server::builder().with_config(&config)?.build()?;
    server.run().await?;

    Ok(())
}
