use chrono::Local;
use pricecast::config::Config;
use pricecast::services::Pipeline;
use pricecast::tui::{run_tui, App, LogBuffer, LogMakeWriter};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing into the buffer shown by the TUI
    let log_buffer = Arc::new(LogBuffer::new(500));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pricecast=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(LogMakeWriter::new(log_buffer.clone())),
        )
        .init();

    let config = Config::from_env();
    info!(
        "Starting {} for {} (horizon {} days, SMA window {})",
        config.page_title(),
        config.symbol,
        config.horizon,
        config.sma_window
    );

    let pipeline = Pipeline::new(config)?;

    // Any failure before the first chart aborts the run.
    let today = Local::now().date_naive();
    let chart = pipeline.run(today).await?;

    let app = App::new(
        pipeline.config().page_title(),
        pipeline.config().subtitle(),
        chart,
        log_buffer,
    );
    run_tui(app, &pipeline).await?;

    Ok(())
}
