//! Focus Flow - A state-managed HTTP server for a Pomodoro focus dashboard
//!
//! This is the main entry point for the focus-flow application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use focus_flow::{
    config::Config,
    state::{AppState, Dashboard},
    api::create_router,
    services::check_notify_send_available,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_flow={},tower_http=info", config.log_level()))
        .init();

    info!("Starting focus-flow server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, initial_time={}s, sessions={}",
          config.host, config.port, config.initial_time, config.total_sessions);

    // Notifications are optional, only warn when the tool is missing
    if let Err(e) = check_notify_send_available().await {
        warn!("{}", e);
    }

    let dashboard = if config.sample_data {
        info!("Loading sample tasks and statistics");
        Dashboard::with_sample_data(config.total_sessions)
    } else {
        Dashboard::new(config.total_sessions)
    };

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.initial_time,
        dashboard,
    ));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /timer              - Countdown and session counter");
    info!("  POST /timer/toggle       - Start or pause the countdown");
    info!("  POST /timer/mode         - Switch focus/shortBreak/longBreak");
    info!("  GET  /timer/events       - Server-sent timer updates");
    info!("  GET  /dashboard          - Full dashboard");
    info!("  GET  /tasks, POST /tasks - Task list");
    info!("  GET  /calendar           - Month calendar");
    info!("  GET  /status             - Server status");
    info!("  GET  /health             - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    state.shutdown();
    info!("Server shutdown complete");
    Ok(())
}
