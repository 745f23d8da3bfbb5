use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use dayframe_types::ArtDate;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{BlobError, BlobResult};

/// Fixed file name of the blob inside each date directory.
const BLOB_FILE_NAME: &str = "image.png";

/// Date-addressed blob store.
///
/// All implementations must satisfy these invariants:
/// - `write` then `read` for the same date returns the written bytes.
/// - `write` is a full overwrite; at most one blob exists per date.
/// - `delete` is idempotent: deleting an absent blob succeeds.
pub trait BlobStore: Send + Sync {
    /// The canonical path a blob for this date lives at, whether or not
    /// one currently exists.
    fn canonical_path(&self, date: ArtDate) -> PathBuf;

    /// Write (or fully overwrite) the blob for a date. Ancestor
    /// directories are created as needed.
    fn write(&self, date: ArtDate, bytes: &[u8]) -> BlobResult<()>;

    /// Read the blob for a date. Fails [`BlobError::NotFound`] if absent.
    fn read(&self, date: ArtDate) -> BlobResult<Vec<u8>>;

    /// Remove the blob for a date. A no-op if already absent.
    fn delete(&self, date: ArtDate) -> BlobResult<()>;

    /// Returns `true` if a blob exists at the canonical path.
    fn exists(&self, date: ArtDate) -> bool;

    /// Every date with a blob at its canonical file, sorted. Feeds the
    /// reconciliation scan.
    fn dates(&self) -> BlobResult<Vec<ArtDate>>;
}

/// Filesystem-backed blob store rooted at a data directory.
#[derive(Clone, Debug)]
pub struct FsBlobStore {
    photos_root: PathBuf,
}

impl FsBlobStore {
    /// Create a store rooted at `<root>/photos`. The directory itself is
    /// provisioned lazily on first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            photos_root: root.as_ref().join("photos"),
        }
    }

    /// The `photos` directory this store reads and writes under.
    pub fn photos_root(&self) -> &Path {
        &self.photos_root
    }
}

impl BlobStore for FsBlobStore {
    fn canonical_path(&self, date: ArtDate) -> PathBuf {
        self.photos_root
            .join(format!("{:04}", date.year()))
            .join(format!("{:02}", date.month()))
            .join(format!("{:02}", date.day()))
            .join(BLOB_FILE_NAME)
    }

    fn write(&self, date: ArtDate, bytes: &[u8]) -> BlobResult<()> {
        let path = self.canonical_path(date);
        if let Some(parent) = path.parent() {
            // Idempotent: create_dir_all succeeds if the tree exists.
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;
        debug!(date = %date, bytes = bytes.len(), "wrote blob");
        Ok(())
    }

    fn read(&self, date: ArtDate) -> BlobResult<Vec<u8>> {
        match fs::read(self.canonical_path(date)) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(BlobError::NotFound(date)),
            Err(err) => Err(err.into()),
        }
    }

    fn delete(&self, date: ArtDate) -> BlobResult<()> {
        match fs::remove_file(self.canonical_path(date)) {
            Ok(()) => {
                debug!(date = %date, "deleted blob");
                Ok(())
            }
            // Already absent: deletion is idempotent.
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn exists(&self, date: ArtDate) -> bool {
        self.canonical_path(date).is_file()
    }

    fn dates(&self) -> BlobResult<Vec<ArtDate>> {
        if !self.photos_root.is_dir() {
            return Ok(Vec::new());
        }
        let mut dates = Vec::new();
        for entry in WalkDir::new(&self.photos_root).min_depth(4).max_depth(4) {
            let entry = entry.map_err(|e| BlobError::Io(e.into()))?;
            if !entry.file_type().is_file() || entry.file_name() != BLOB_FILE_NAME {
                continue;
            }
            match date_from_dir(&self.photos_root, entry.path()) {
                Some(date) => dates.push(date),
                None => {
                    debug!(path = %entry.path().display(), "skipping non-date path in photos tree");
                }
            }
        }
        dates.sort();
        Ok(dates)
    }
}

/// Parse `<photos>/<y>/<m>/<d>/image.png` back into a date.
///
/// Components are parsed numerically, so historical trees with unpadded
/// month/day directories are still recognized.
fn date_from_dir(photos_root: &Path, blob_path: &Path) -> Option<ArtDate> {
    let rel = blob_path.parent()?.strip_prefix(photos_root).ok()?;
    let mut parts = rel.iter();
    let year: i32 = parts.next()?.to_str()?.parse().ok()?;
    let month: u32 = parts.next()?.to_str()?.parse().ok()?;
    let day: u32 = parts.next()?.to_str()?.parse().ok()?;
    ArtDate::from_ymd(year, month, day).ok()
}
