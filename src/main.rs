use anyhow::Context;
use axum::Router;

use otp_login_api::config::AppConfig;
use otp_login_api::{build_router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => {
            tracing::info!("✅ App config loaded successfully");
            tracing::info!("📱 SMS sender: {}", config.msg91.sender_id);
            tracing::debug!("Config: {}", config.get_config_info());
            config
        }
        Err(e) => {
            tracing::error!("❌ Failed to load app config: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = AppState::from_config(&config);
    let app = build_router(app_state);

    if let Err(e) = start_server(&config, app).await {
        tracing::error!("Server error: {:#}", e);
        std::process::exit(1);
    }
}

async fn start_server(config: &AppConfig, app: Router) -> anyhow::Result<()> {
    let addr = config.bind_address();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("🚀 Server starting on {}", addr);

    axum::serve(listener, app)
        .await
        .context("HTTP server stopped unexpectedly")
}
