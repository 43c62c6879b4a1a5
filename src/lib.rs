#[macro_use]
extern crate rocket;

pub mod api;
pub mod config;
pub mod images;
pub mod resolver;
pub mod store;

use rocket::figment::Figment;
use rocket::{Build, Rocket};

use resolver::ThumbnailResolver;

/// Assemble the Rocket instance. Split from `main` so tests can mount the
/// same routes over their own store and resizer.
pub fn build_rocket(figment: Figment, resolver: ThumbnailResolver) -> Rocket<Build> {
    rocket::custom(figment)
        .manage(resolver)
        .mount("/", routes![api::images::info])
        .mount("/api", routes![api::images::get_image])
}
