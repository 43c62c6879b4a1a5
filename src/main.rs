#[macro_use]
extern crate rocket;

use std::env;
use std::sync::Arc;

use dotenv::dotenv;
use env_logger::Env;
use log::{info, warn};
use rocket::{
    figment::{
        providers::{Format, Toml},
        Figment, Profile,
    },
    Config,
};

use thumbserve::config::AppConfig;
use thumbserve::images::JpegResizer;
use thumbserve::resolver::ThumbnailResolver;
use thumbserve::store::ArtifactStore;

#[launch]
fn rocket() -> _ {
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    // Load config
    let mut figment = Figment::from(Config::default()).merge(Toml::file("App.toml").nested());

    // Merge directory overrides if available from environment
    if let Ok(dir) = env::var("IMAGES_DIR") {
        figment = figment.merge(("images_dir", dir));
    }
    if let Ok(dir) = env::var("THUMBS_DIR") {
        figment = figment.merge(("thumbs_dir", dir));
    }

    figment = figment.select(Profile::from_env_or("APP_PROFILE", "default"));

    // App config
    let config = figment.extract::<AppConfig>().unwrap();
    info!("Configuration loaded successfully");

    // Artifact store owns the two roots; the thumbnails root is created
    // before the server accepts requests.
    let store = ArtifactStore::new(config.images_dir.clone(), config.thumbs_dir.clone());
    if let Err(err) = store.ensure_thumbnail_root() {
        warn!("Could not create thumbnails root: {}", err);
    }
    info!(
        "Serving originals from '{}', thumbnails from '{}'",
        config.images_dir, config.thumbs_dir
    );

    let resolver = ThumbnailResolver::new(store, Arc::new(JpegResizer::new()));

    info!(
        "Starting thumbserve API server on {}:{}",
        config.address, config.port
    );

    thumbserve::build_rocket(figment, resolver)
}
