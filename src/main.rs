use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use clap::Parser;
use tracing::{error, info};

use job_board::api::Services;
use job_board::cli::{Cli, Command};
use job_board::config::Config;
use job_board::db::{self, JobRepository, JobStore};
use job_board::logging;
use job_board::shutdown::ShutdownCoordinator;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    let Config {
        database_url,
        max_db_connections,
        max_payload_size,
        host,
        port,
        log_dir,
        jobs_per_page,
        companies_per_page,
    } = Config::from_env().map_err(std::io::Error::other)?;

    // logs/info.log.2024-12-22, logs/error.log.2024-12-22, ...
    logging::init(&log_dir)?;

    let pool = db::connection::get_connection(&database_url, max_db_connections)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {}", e);
            std::io::Error::other(e)
        })?;
    info!("Database connection pool established");

    db::migrations::run_migrations(&pool).await.map_err(|e| {
        error!("Failed to run database migrations: {}", e);
        std::io::Error::other(e)
    })?;

    if cli.command() == Command::Migrate {
        pool.close().await;
        return Ok(());
    }

    info!("Starting job-board");
    info!("  - Max payload size: {} bytes", max_payload_size);
    info!("  - Max database connections: {}", max_db_connections);
    info!("  - Page sizes: {} jobs, {} companies", jobs_per_page, companies_per_page);

    let store: Arc<dyn JobStore> = Arc::new(JobRepository::new(pool.clone()));
    let services = Services::new(store, jobs_per_page, companies_per_page);

    let server = HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .app_data(web::PayloadConfig::default().limit(max_payload_size))
            .configure(move |cfg| services.register(cfg))
    })
    .bind((host.as_str(), port))?
    .run();

    info!("Server listening on http://{}:{}", host, port);

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task, pool)
        .wait_for_shutdown()
        .await
}
