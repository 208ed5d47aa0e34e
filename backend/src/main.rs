mod assets;
mod catalog;
mod config;
mod error;
mod services;
mod store;
mod upload;
mod views;

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::store::{CatalogStore, FsCatalogStore};
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::fs;
use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config =
        AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let url = config.url();

    // Record files are mounted from here, so it has to exist before the server starts.
    fs::create_dir_all(&config.data_dir)?;

    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url);
        });
    }

    let store: Arc<dyn CatalogStore> = Arc::new(FsCatalogStore::new(&config.data_dir));
    let catalog = web::Data::new(Catalog::new(store, config.public_prefix.clone()));
    let data_dir = config.data_dir.clone();

    info!(
        "Laura's Lagoon listening at {} (records in {})",
        url,
        data_dir.display()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(|cfg| services::configure(cfg, catalog.clone(), &data_dir))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
