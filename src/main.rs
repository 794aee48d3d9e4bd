// astro-report-service/src/main.rs

use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use astro_report_service::config::Config;
use astro_report_service::pdf::devanagari_font_bytes;
use astro_report_service::reports::ReportContext;
use astro_report_service::routes;
use astro_report_service::upstream::UpstreamClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Print to stderr BEFORE logging initialization to catch early failures
    eprintln!("Starting astro-report-service...");

    let config = match Config::load() {
        Ok(cfg) => {
            eprintln!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            eprintln!("FATAL: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.service.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!(
        service = %config.service.name,
        version = env!("CARGO_PKG_VERSION"),
        "Starting Astro Report Service"
    );

    let upstream = UpstreamClient::new(
        &config.backend.base_url,
        Duration::from_secs(config.backend.timeout_secs),
    )
    .context("failed to build upstream HTTP client")?;

    // Prewarm the Devanagari font cache; hi/mr requests fail individually
    // if the file is still missing at request time.
    match devanagari_font_bytes(&config.pdf.devanagari_font) {
        Ok(bytes) => info!(
            path = %config.pdf.devanagari_font,
            size_bytes = bytes.len(),
            "Devanagari font loaded"
        ),
        Err(e) => warn!(
            path = %config.pdf.devanagari_font,
            error = %e,
            "Devanagari font not available, hi/mr reports will fail"
        ),
    }

    let ctx = ReportContext {
        upstream,
        branding: config.pdf.branding.clone(),
        devanagari_font_path: config.pdf.devanagari_font.clone(),
    };

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    info!(bind = %config.server.bind, "HTTP server listening");

    axum::serve(listener, routes::router(ctx))
        .await
        .context("HTTP server exited")?;

    Ok(())
}
