// src/main.rs

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http, middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{error, info};

use task_tracker::config::{Config, StorageKind};
use task_tracker::repository::{InMemoryTaskRepository, MongoTaskRepository, TaskRepository};
use task_tracker::task_db::MongoDB;
use task_tracker::{task, AppState};

async fn build_repository(config: &Config) -> io::Result<Arc<dyn TaskRepository>> {
    match config.storage {
        StorageKind::Memory => {
            info!("Using in-memory task storage");
            Ok(Arc::new(InMemoryTaskRepository::new()))
        }
        StorageKind::Mongo => {
            let uri = config.mongo_uri.as_deref().ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "MONGO_URI must be set")
            })?;
            let mongodb = MongoDB::init(uri, &config.database_name)
                .await
                .map_err(|e| {
                    error!("Failed to initialize MongoDB client: {}", e);
                    io::Error::other(e)
                })?;
            Ok(Arc::new(MongoTaskRepository::new(&mongodb.db)))
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;
    let repository = build_repository(&config).await?;
    let state = AppState::new(repository);

    info!("Server running at http://{}", config.bind_address);
    info!("Allowed CORS Origin: {}", config.frontend_origin);

    let frontend_origin = config.frontend_origin.clone();
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![http::header::CONTENT_TYPE, http::header::ACCEPT])
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .configure(task::configure)
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
