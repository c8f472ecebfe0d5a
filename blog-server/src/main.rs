use dotenvy::dotenv;
use std::sync::Arc;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;

use application::BlogService;
use data::blog_repository::SqliteBlogRepository;
use infrastructure::{
    config::ServerConfig,
    database::{create_pool, run_migrations},
    logging::{init_logging, DEFAULT_LOG_FILTER},
};
use presentation::configure_routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    init_logging(DEFAULT_LOG_FILTER);

    let config = ServerConfig::from_env();

    tracing::info!("Starting BlogIt server...");
    tracing::info!("HTTP server will listen on {}", config.bind_addr());
    tracing::info!("Database: {}", config.database_path);

    let pool = create_pool(&config.database_path, config.database_max_connections).await?;

    tracing::info!("Running database migrations...");
    run_migrations(&pool).await?;

    let blog_repo = Arc::new(SqliteBlogRepository::new(pool.clone()));
    let blog_service = Arc::new(BlogService::new(blog_repo));

    tracing::info!("Services initialized successfully");

    run_http_server(config, blog_service).await?;

    tracing::info!("Shutting down...");
    pool.close().await;
    Ok(())
}

/// CORS for the browser front-end when it is served from another origin.
fn configure_cors(allowed_origins: &[String]) -> actix_cors::Cors {
    use actix_cors::Cors;
    use actix_web::http::header;

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600);

    for origin in allowed_origins {
        cors = cors.allowed_origin(origin);
        tracing::debug!("Added allowed CORS origin: {}", origin);
    }

    cors
}

async fn run_http_server(config: ServerConfig, blog_service: Arc<BlogService>) -> anyhow::Result<()> {
    use actix_web::{middleware::Logger, web, App, HttpServer};

    let addr = config.bind_addr();
    let origins = config.cors_allowed_origins.clone();

    tracing::info!("CORS allowed origins: {:?}", origins);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(configure_cors(&origins))
            .app_data(web::Data::new(blog_service.clone()))
            .configure(configure_routes)
    })
    .bind(&addr)?
    .run();

    tracing::info!("HTTP server running on {}", addr);

    server.await?;

    Ok(())
}
