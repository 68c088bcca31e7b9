/**
 * Directline Server Entry Point
 *
 * Loads configuration from the environment, opens the database, and
 * serves the app.
 */
use directline::attachments::MediaStore;
use directline::server::config::{connect_database, ServerConfig};
use directline::server::init::create_app;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(?config, "starting directline server");

    let pool = connect_database(&config.database_url).await?;
    tokio::fs::create_dir_all(&config.media_root).await?;

    let app = create_app(pool, MediaStore::new(&config.media_root));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
