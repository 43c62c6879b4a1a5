use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;

/// Extension of every artifact the store knows about. Originals are expected
/// to be stored with it, thumbnails are always written with it.
pub const IMAGE_EXT: &str = "jpg";

/// Outcome of probing a path on disk. `NotPresent` and `IoFailure` are
/// treated identically by callers today (both mean "not available"), but are
/// kept distinct so the difference is not lost at the source.
#[derive(Debug, PartialEq, Eq)]
pub enum Availability {
    Present,
    NotPresent,
    IoFailure,
}

/// Owns the two on-disk roots: originals (read-only to this service) and
/// thumbnails (written lazily, kept forever). All cache paths are derived
/// here and nowhere else.
///
/// Thumbnail filenames encode the key as `{name}-{width}x{height}.jpg`.
/// Identifiers are assumed not to contain the `-{digits}x{digits}` tail
/// pattern themselves; that constraint is documented, not enforced.
pub struct ArtifactStore {
    originals_root: PathBuf,
    thumbs_root: PathBuf,
}

impl ArtifactStore {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(originals_root: P, thumbs_root: Q) -> Self {
        Self {
            originals_root: originals_root.into(),
            thumbs_root: thumbs_root.into(),
        }
    }

    /// Path of an original. Pure, no I/O.
    pub fn original_path(&self, name: &str) -> PathBuf {
        self.originals_root.join(format!("{}.{}", name, IMAGE_EXT))
    }

    /// Path of a resized variant. Pure, no I/O. Two calls with the same
    /// (name, width, height) always return the same path; this determinism
    /// is what makes the path usable as a cache key.
    pub fn thumbnail_path(&self, name: &str, width: u32, height: u32) -> PathBuf {
        self.thumbs_root
            .join(format!("{}-{}x{}.{}", name, width, height, IMAGE_EXT))
    }

    /// Check whether an artifact is present on disk.
    pub fn probe(&self, path: &Path) -> Availability {
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => Availability::Present,
            Ok(_) => Availability::NotPresent,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Availability::NotPresent,
            Err(err) => {
                warn!("Probing {} failed: {}", path.display(), err);
                Availability::IoFailure
            }
        }
    }

    /// List the identifiers of all available originals, extension stripped,
    /// sorted. A missing or unreadable originals root yields an empty list
    /// rather than an error.
    pub fn list_originals(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.originals_root) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    "Could not read originals root {}: {}",
                    self.originals_root.display(),
                    err
                );
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(|stem| stem.to_string())
            })
            .filter(|name| !name.is_empty())
            .collect();
        names.sort();
        names
    }

    /// Create the thumbnails root if it does not exist yet. Idempotent;
    /// called once at startup before requests are accepted.
    pub fn ensure_thumbnail_root(&self) -> io::Result<()> {
        fs::create_dir_all(&self.thumbs_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ArtifactStore {
        ArtifactStore::new(dir.path().join("full"), dir.path().join("thumb"))
    }

    #[test]
    fn original_path_joins_root_name_and_extension() {
        let store = ArtifactStore::new("/data/full", "/data/thumb");
        assert_eq!(
            store.original_path("fjord"),
            PathBuf::from("/data/full/fjord.jpg")
        );
    }

    #[test]
    fn thumbnail_path_encodes_name_and_dimensions() {
        let store = ArtifactStore::new("/data/full", "/data/thumb");
        assert_eq!(
            store.thumbnail_path("fjord", 199, 199),
            PathBuf::from("/data/thumb/fjord-199x199.jpg")
        );
    }

    #[test]
    fn thumbnail_path_is_deterministic() {
        let store = ArtifactStore::new("/data/full", "/data/thumb");
        let first = store.thumbnail_path("fjord", 640, 480);
        let second = store.thumbnail_path("fjord", 640, 480);
        assert_eq!(first, second);
    }

    #[test]
    fn distinct_dimensions_yield_distinct_paths() {
        let store = ArtifactStore::new("/data/full", "/data/thumb");
        assert_ne!(
            store.thumbnail_path("fjord", 12, 34),
            store.thumbnail_path("fjord", 123, 4)
        );
    }

    #[test]
    fn probe_reports_present_for_existing_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.ensure_thumbnail_root().unwrap();
        let path = store.thumbnail_path("fjord", 10, 10);
        fs::write(&path, b"jpeg bytes").unwrap();
        assert_eq!(store.probe(&path), Availability::Present);
    }

    #[test]
    fn probe_reports_not_present_for_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let path = store.thumbnail_path("fjord", 10, 10);
        assert_eq!(store.probe(&path), Availability::NotPresent);
    }

    #[test]
    fn list_originals_strips_extensions_and_sorts() {
        let dir = TempDir::new().unwrap();
        let full = dir.path().join("full");
        fs::create_dir_all(&full).unwrap();
        fs::write(full.join("palm.jpg"), b"").unwrap();
        fs::write(full.join("fjord.jpg"), b"").unwrap();
        let store = store_in(&dir);
        assert_eq!(store.list_originals(), vec!["fjord", "palm"]);
    }

    #[test]
    fn list_originals_is_empty_when_root_is_missing() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.list_originals().is_empty());
    }

    #[test]
    fn ensure_thumbnail_root_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.ensure_thumbnail_root().unwrap();
        store.ensure_thumbnail_root().unwrap();
        assert!(dir.path().join("thumb").is_dir());
    }
}
