use mock_server::Todo;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let seed: Vec<Todo> = match std::env::var("TODOS_SEED") {
        Ok(path) => serde_json::from_str(&std::fs::read_to_string(&path)?)?,
        Err(_) => Vec::new(),
    };
    let port = std::env::var("PORT").unwrap_or_else(|_| "4567".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, seeded = seed.len(), "listening");
    mock_server::run_with(listener, seed).await?;
    Ok(())
}
