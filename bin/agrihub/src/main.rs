//! # AgriHub Binary
//!
//! Assembles the application from the plugins selected at compile time.

use std::sync::Arc;
use std::time::Duration;

use ah_api::{router, AppState, Ports};
use ah_config::{LogFormat, Settings};
use ah_core::clock::SystemClock;
use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "ai-bk9")]
use ah_ai_bk9::Bk9Client;
#[cfg(feature = "media-catbox")]
use ah_media_catbox::CatboxHost;
#[cfg(feature = "store-memory")]
use ah_store_memory::MemoryStore;
#[cfg(feature = "weather-openmeteo")]
use ah_weather_openmeteo::OpenMeteoClient;

#[cfg(not(all(
    feature = "store-memory",
    feature = "ai-bk9",
    feature = "weather-openmeteo",
    feature = "media-catbox"
)))]
compile_error!("agrihub needs one implementation of every port; enable the default features");

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn weather_ttl(secs: i64) -> anyhow::Result<chrono::Duration> {
    anyhow::ensure!(secs >= 0, "weather.ttl_secs must not be negative, got {secs}");
    chrono::Duration::try_seconds(secs)
        .with_context(|| format!("weather.ttl_secs {secs} is out of range"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading settings")?;
    init_tracing(settings.log.format);

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.http.timeout_secs))
        .build()
        .context("building HTTP client")?;

    let clock = Arc::new(SystemClock);
    let repo = Arc::new(MemoryStore::with_clock(clock.clone()));
    let ai = Arc::new(Bk9Client::new(
        http.clone(),
        &settings.ai.base_url,
        settings.ai.chat_model.clone(),
        settings.ai.vision_model.clone(),
        settings.ai.system_prompt.clone(),
    ));
    let weather = Arc::new(OpenMeteoClient::new(http.clone(), &settings.weather.base_url));
    let media = Arc::new(CatboxHost::new(
        http,
        settings.upload.endpoint.clone(),
        settings.upload.userhash.clone(),
    ));

    let cache_ttl = weather_ttl(settings.weather.ttl_secs)?;

    let state = AppState::new(Ports {
        repo,
        chat: ai.clone(),
        vision: ai,
        weather,
        media,
        clock,
    })
    .with_weather_ttl(cache_ttl)
    .with_body_limit(settings.upload.max_bytes);

    let app = router(Arc::new(state));

    let address = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    info!("AgriHub listening on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
