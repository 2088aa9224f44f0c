use std::sync::Arc;
use std::time::Duration;

use tower_http::services::ServeDir;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nugget_news::client::NewsClient;
use nugget_news::config::Config;
use nugget_news::routes::{self, AppState};
use nugget_news::session::{start_session_sweeper, SessionStore};

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nugget_news=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path =
        std::env::var("NUGGET_CONFIG").unwrap_or_else(|_| "nugget.toml".to_string());
    let mut config = Config::load_or_default(&config_path)?;
    if !std::path::Path::new(&config_path).exists() {
        warn!("{} not found, using default configuration", config_path);
    }
    if let Ok(base_url) = std::env::var("API_BASE_URL") {
        config.api_base_url = base_url;
    }
    config.validate()?;
    info!(
        "Using news API at {} ({} articles per category)",
        config.api_base_url, config.article_limit
    );

    let client = Arc::new(NewsClient::new(&config.api_base_url)?);

    // Start session sweeper
    let sessions = Arc::new(SessionStore::new(Duration::from_secs(
        config.session_ttl_minutes * 60,
    )));
    let sweeper_sessions = sessions.clone();
    tokio::spawn(async move {
        start_session_sweeper(sweeper_sessions, SWEEP_INTERVAL).await;
    });

    // Create app state
    let state = Arc::new(AppState {
        client,
        sessions,
        article_limit: config.article_limit,
    });

    // Build router
    let app = routes::router(state).nest_service("/static", ServeDir::new("static"));

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Server starting on http://{}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
