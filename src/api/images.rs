use rocket::fs::NamedFile;
use rocket::serde::json::Value;
use rocket::State;
use serde_json::json;

use crate::api::ApiError;
use crate::resolver::{ImageRequest, ThumbnailResolver};

#[get("/")]
pub fn info() -> Value {
    json!({
        "service": "thumbserve",
        "version": env!("CARGO_PKG_VERSION"),
        "usage": "/api/images?filename=<name>&width=<w>&height=<h>",
    })
}

#[get("/images?<filename>&<width>&<height>")]
pub async fn get_image(
    filename: Option<String>,
    width: Option<String>,
    height: Option<String>,
    resolver: &State<ThumbnailResolver>,
) -> Result<NamedFile, ApiError> {
    let request = ImageRequest {
        filename,
        width,
        height,
    };

    let path = resolver.resolve(&request)?;

    // Content type is inferred from the path's extension by NamedFile.
    match NamedFile::open(&path).await {
        Ok(file) => Ok(file),
        Err(err) => {
            log::error!("Could not open resolved artifact {}: {}", path.display(), err);
            Err(ApiError::Unavailable)
        }
    }
}
