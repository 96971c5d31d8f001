mod cli;

use crate::cli::{GeneratorArg, CLI};
use anyhow::anyhow;
use clap::Parser;
use std::sync::Arc;
use stubby_gateway::{telemetry, App, AppState};
use stubby_generator::{Generator, RandomGenerator, RandomGeneratorSettings, SeqGenerator};
use stubby_redirector::{AggregatorSettings, ClickAggregator, RedirectorService};
use stubby_storage::{InMemoryRepository, RepositorySettings};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    telemetry::init(config.log_format).map_err(|err| anyhow!(err))?;

    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        generator = %config.generator,
        click_queue_capacity = config.click_queue_capacity,
        "starting stubby http server"
    );

    let settings = RepositorySettings::builder()
        .max_attempts(config.max_attempts)
        .build();

    match config.generator {
        GeneratorArg::Random => {
            let generator = RandomGenerator::new(
                RandomGeneratorSettings::builder()
                    .length(config.id_length)
                    .build(),
            )?;
            run_server(&config, InMemoryRepository::with_settings(generator, settings)).await
        }
        GeneratorArg::Seq => {
            let generator = SeqGenerator::with_prefix(config.generator_prefix.clone());
            run_server(&config, InMemoryRepository::with_settings(generator, settings)).await
        }
    }
}

async fn run_server<G: Generator>(
    config: &CLI,
    repository: InMemoryRepository<G>,
) -> anyhow::Result<()> {
    let repository = Arc::new(repository);
    let (clicks, aggregator) = ClickAggregator::spawn(
        Arc::clone(&repository),
        AggregatorSettings::builder()
            .capacity(config.click_queue_capacity)
            .build(),
    );
    let redirector = Arc::new(RedirectorService::new(Arc::clone(&repository), clicks));
    let state = AppState::new(repository, redirector, config.base_url.as_str());

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router held the last click sender; the aggregator now drains and stops.
    let report = aggregator.shutdown().await?;
    info!(
        applied = report.applied,
        failed = report.failed,
        "click aggregator drained"
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
