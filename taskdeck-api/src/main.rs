use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

use taskdeck_api::config::ApiConfig;
use taskdeck_api::handlers;
use taskdeck_api::helpers::database::initialize_database;
use taskdeck_api::helpers::sessions::SessionStore;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,

    /// Config file, defaults to ~/.config/taskdeck/api.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing(log_file_path: Option<String>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(&log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("taskdeck-api.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

fn cors(config: &ApiConfig) -> Cors {
    let cors = match &config.cors {
        Some(cors_config) => {
            let mut cors_builder = Cors::default();
            for origin in &cors_config.allowed_origins {
                cors_builder = cors_builder.allowed_origin(origin);
            }
            cors_builder
        }
        None => Cors::default().allow_any_origin(),
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec!["Authorization", "Accept", "Content-Type"])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file_path);

    let (config, config_path) = ApiConfig::load(args.config)?;
    tracing::info!("Loaded config from {}", config_path.display());

    let db = initialize_database(&config)?;
    let sessions = Arc::new(SessionStore::new(config.session_ttl_hours()));

    let (host, port) = config.host_and_port();
    tracing::info!("Server will listen on {}:{}", host, port);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&config))
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(sessions.clone()))
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run();

    let handle = server.handle();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }

        tracing::info!("Ctrl+C received, shutting down...");
        handle.stop(true).await;
    });

    server.await?;
    Ok(())
}
