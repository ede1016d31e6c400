use std::sync::Arc;

use narrated_video::{handlers, AppConfig, AppState};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_logging().expect("Failed to initialize logging");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Invalid configuration: {}", e);
            tracing::info!("Required: IMGBB_API_KEY, VIDEO_WEBHOOK_URL. Optional: IMGBB_UPLOAD_URL, HTTP_TIMEOUT_SECS, BIND_ADDR");
            std::process::exit(1);
        }
    };

    tracing::info!("Image host endpoint: {}", config.imgbb_upload_url);
    tracing::info!("Video webhook endpoint: {}", config.video_webhook_url);
    tracing::info!("Upstream timeout: {}s", config.http_timeout.as_secs());

    let bind_addr = config.bind_addr.clone();
    let shared_state = match AppState::from_config(config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("❌ Failed to build HTTP clients: {}", e);
            std::process::exit(1);
        }
    };

    let app = handlers::app_router(shared_state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!("listening on {}", listener.local_addr().expect("listener has no local address"));
    axum::serve(listener, app).await.expect("Server error");
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            "debug,narrated_video=trace,reqwest=info,hyper=info,tower=info".to_string()
        } else {
            "info,narrated_video=info,reqwest=warn,hyper=warn,tower=warn".to_string()
        }
    });

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log_level))?;

    let fmt_layer = if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    tracing_subscriber::registry().with(env_filter).with(fmt_layer).init();

    tracing::info!("🎬 Narrated video generator starting up...");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Build mode: {}", if cfg!(debug_assertions) { "development" } else { "production" });
    tracing::info!("Log level: {}", log_level);

    Ok(())
}
