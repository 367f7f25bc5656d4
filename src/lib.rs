pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;
use tokio::signal;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, EpisodeCommands, SeasonCommands, SeriesCommands};
pub use config::Config;
use metrics_exporter_prometheus::PrometheusHandle;
use state::SharedState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Some(Commands::Init)) {
        if Config::create_default_if_missing()? {
            println!("✓ Config file created. Edit config.toml and run again.");
        } else {
            println!("Config file already exists.");
        }
        return Ok(());
    }

    let config = Config::load()?;
    config.validate()?;

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let builder = PrometheusBuilder::new();
        let handle = builder
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        Some(handle)
    } else {
        None
    };

    init_tracing(&config.general.log_level);

    if prometheus_handle.is_some() {
        info!("Prometheus metrics recorder initialized");
    }

    let Some(command) = cli.command else {
        return run_server(config, prometheus_handle).await;
    };

    match command {
        Commands::Serve => run_server(config, prometheus_handle).await,

        Commands::Init => Ok(()),

        Commands::Series { command } => match command {
            SeriesCommands::List { search, year } => {
                cli::cmd_series_list(&config, search, year).await
            }
            SeriesCommands::Show { series } => cli::cmd_series_show(&config, &series).await,
            SeriesCommands::Add {
                title,
                slug,
                description,
                year,
            } => cli::cmd_series_add(&config, &title, slug, description, year).await,
            SeriesCommands::Remove { id, yes } => cli::cmd_series_remove(&config, &id, yes).await,
        },

        Commands::Season { command } => match command {
            SeasonCommands::List { series_id } => cli::cmd_season_list(&config, &series_id).await,
            SeasonCommands::Add {
                series_id,
                number,
                title,
                description,
                year,
            } => cli::cmd_season_add(&config, &series_id, number, title, description, year).await,
            SeasonCommands::Remove { id, yes } => cli::cmd_season_remove(&config, &id, yes).await,
        },

        Commands::Episode { command } => match command {
            EpisodeCommands::List { season_id } => {
                cli::cmd_episode_list(&config, &season_id).await
            }
            EpisodeCommands::Show { id } => cli::cmd_episode_show(&config, &id).await,
            EpisodeCommands::Add {
                season_id,
                number,
                title,
                video,
                slug,
                description,
                duration,
            } => {
                cli::cmd_episode_add(
                    &config,
                    &season_id,
                    number,
                    &title,
                    &video,
                    slug,
                    description,
                    duration,
                )
                .await
            }
            EpisodeCommands::Remove { id, yes } => {
                cli::cmd_episode_remove(&config, &id, yes).await
            }
        },
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    info!(
        "series-catalog v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    if !config.server.enabled {
        info!("HTTP server disabled in config; nothing to do");
        return Ok(());
    }

    let port = config.server.port;
    let shared = Arc::new(SharedState::new(config).await?);
    let api_state = api::create_app_state(shared, prometheus_handle);
    let app = api::router(api_state).await;

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🌐 Web Server running at http://{}", addr);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Web server error: {}", e);
        }
    });

    info!("Press Ctrl+C to stop.");

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            error!("Error listening for shutdown: {}", e);
        }
    }

    server_handle.abort();
    info!("Server stopped");

    Ok(())
}
