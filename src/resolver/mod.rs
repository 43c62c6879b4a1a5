use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, info};
use thiserror::Error;

use crate::images::Resizer;
use crate::store::{ArtifactStore, Availability};

/// Raw query parameters of an image request. Dimensions stay strings until
/// validation; a missing value behaves like an empty one, so a request
/// carrying only one of width/height fails the positive-integer parse of the
/// other without any special casing.
#[derive(Debug, Default)]
pub struct ImageRequest {
    pub filename: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
}

#[derive(Error, Debug)]
pub enum ResolveError {
    /// Validation failure, including an unknown filename. Always carries a
    /// user-facing message.
    #[error("{0}")]
    Rejected(String),

    /// The resize primitive failed. Opaque message, no retry.
    #[error("{0}")]
    Processing(String),
}

/// Decides what to serve for a request: validates it, looks the artifact up
/// in the store and triggers generation on a cache miss.
pub struct ThumbnailResolver {
    store: ArtifactStore,
    resizer: Arc<dyn Resizer>,
}

impl ThumbnailResolver {
    pub fn new(store: ArtifactStore, resizer: Arc<dyn Resizer>) -> Self {
        Self { store, resizer }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Validation, then lookup, then generation if needed. Returns the path
    /// of the artifact to serve.
    ///
    /// Two concurrent first requests for the same (name, width, height) can
    /// both miss and both generate; the writes are derived from identical
    /// inputs, so the second overwrite is harmless and no per-key lock is
    /// taken.
    pub fn resolve(&self, request: &ImageRequest) -> Result<PathBuf, ResolveError> {
        let name = request.filename.as_deref().unwrap_or("");

        // Name check comes first; a bad size on an unknown name still
        // reports the name error.
        let available = self.store.list_originals();
        if name.is_empty() || !available.iter().any(|n| n == name) {
            return Err(ResolveError::Rejected(format!(
                "Please pass a valid filename in the 'filename' query segment. \
                 Available filenames are: {}.",
                available.join(", ")
            )));
        }

        // No size values: serve the original. Membership above is evidence
        // enough that the file exists; no second probe.
        if request.width.is_none() && request.height.is_none() {
            return Ok(self.store.original_path(name));
        }

        let width = parse_dimension(request.width.as_deref()).ok_or_else(|| {
            ResolveError::Rejected(
                "Please provide a positive numerical value for the 'width' query segment."
                    .to_string(),
            )
        })?;
        let height = parse_dimension(request.height.as_deref()).ok_or_else(|| {
            ResolveError::Rejected(
                "Please provide a positive numerical value for the 'height' query segment."
                    .to_string(),
            )
        })?;

        let thumb_path = self.store.thumbnail_path(name, width, height);
        if self.store.probe(&thumb_path) == Availability::Present {
            debug!("Thumbnail cache hit: {}", thumb_path.display());
            return Ok(thumb_path);
        }

        info!("Creating thumbnail {}", thumb_path.display());
        self.resizer
            .resize(&self.store.original_path(name), &thumb_path, width, height)
            .map_err(|e| ResolveError::Processing(e.to_string()))?;

        Ok(thumb_path)
    }
}

/// A dimension is valid when it parses as an integer >= 1. `None` is treated
/// as the empty string, which does not parse.
fn parse_dimension(value: Option<&str>) -> Option<u32> {
    match value.unwrap_or("").trim().parse::<i64>() {
        Ok(n) if n >= 1 => u32::try_from(n).ok(),
        _ => None,
    }
}
