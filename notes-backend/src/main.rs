use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use dotenv::dotenv;
use std::sync::Arc;

mod config;
mod controllers;
mod models;
mod repo;

use config::Config;
use repo::NoteStore;

pub struct AppState {
    pub store: Arc<NoteStore>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    log::info!("Notes backend v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();

    // The store lives for the whole process; every worker shares it
    let store = Arc::new(NoteStore::new());
    let state = web::Data::new(AppState { store });

    log::info!("Server listening on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(controllers::json_config())
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .configure(controllers::notes::config)
            .configure(controllers::health::config_routes)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}
